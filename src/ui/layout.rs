use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥90 cols: question grid beside the card
    Medium, // 60-89 cols: grid stacked above the card
    Narrow, // <60 cols: card only
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 90 {
            LayoutTier::Wide
        } else if area.width >= 60 {
            LayoutTier::Medium
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn allows_grid(&self) -> bool {
        *self != LayoutTier::Narrow
    }
}

/// Regions of the quiz screen.
pub struct QuizLayout {
    pub header: Rect,
    pub progress: Rect,
    pub grid: Option<Rect>,
    pub main: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl QuizLayout {
    pub fn new(area: Rect, grid_rows: u16, show_grid: bool) -> Self {
        let tier = LayoutTier::from_area(area);
        let show_grid = show_grid && tier.allows_grid();

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(2),
            ])
            .split(area);
        let body = vertical[2];

        let (grid, main) = match (show_grid, tier) {
            (false, _) => (None, body),
            (true, LayoutTier::Wide) => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(30), Constraint::Min(40)])
                    .split(body);
                (Some(cols[0]), cols[1])
            }
            (true, _) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(grid_rows + 4), Constraint::Min(6)])
                    .split(body);
                (Some(rows[0]), rows[1])
            }
        };

        Self {
            header: vertical[0],
            progress: vertical[1],
            grid,
            main,
            footer: vertical[3],
            tier,
        }
    }
}

/// Header plus a body, used by every screen other than the quiz.
pub fn split_header(area: Rect) -> (Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    (vertical[0], vertical[1])
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if current.len() > prefix.len() {
            format!("{current}  {hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width || current.len() == prefix.len() {
            current = candidate;
        } else {
            out.push(current);
            current = format!("{prefix}{hint}");
        }
    }

    if current.len() > prefix.len() {
        out.push(current);
    }
    out
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let left = area.x.saturating_add(area.width.saturating_sub(w) / 2);
    let top = area.y.saturating_add(area.height.saturating_sub(h) / 2);
    Rect::new(left, top, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_width() {
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 120, 30)), LayoutTier::Wide);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 70, 30)), LayoutTier::Medium);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 40, 30)), LayoutTier::Narrow);
    }

    #[test]
    fn grid_hidden_when_collapsed_or_narrow() {
        let wide = Rect::new(0, 0, 120, 40);
        assert!(QuizLayout::new(wide, 2, true).grid.is_some());
        assert!(QuizLayout::new(wide, 2, false).grid.is_none());
        assert!(QuizLayout::new(Rect::new(0, 0, 50, 40), 2, true).grid.is_none());
    }

    #[test]
    fn hints_wrap_to_width() {
        let lines = pack_hint_lines(&["[a] one", "[b] two", "[c] three"], 20);
        assert_eq!(lines, vec!["  [a] one  [b] two", "  [c] three"]);
        assert!(pack_hint_lines(&["x"], 0).is_empty());
    }

    #[test]
    fn centered_rect_is_clamped() {
        let r = centered_rect(200, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(r, Rect::new(0, 7, 80, 10));
    }
}

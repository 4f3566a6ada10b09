use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::widgets::{Block, BorderType, Borders, Widget};

/// A bordered two-column grid of labelled stat values — the terminal take on
/// the dashboard's stat cards. Entries fill the left column top to bottom,
/// then the right.
pub struct StatCards<'a> {
    pub title: &'a str,
    pub entries: Vec<(String, String)>,
}

impl StatCards<'_> {
    /// Rows needed to show every entry in two columns, plus the border.
    pub fn preferred_height(&self) -> u16 {
        (self.entries.len().div_ceil(2) as u16) + 2
    }
}

impl Widget for StatCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let rows = usize::from(inner.height);
        let col_width = if inner.width >= 24 { inner.width / 2 } else { inner.width };
        let label_style = Style::default().fg(Color::Gray);
        let value_style = Style::default().fg(Color::White);

        for (idx, (label, value)) in self.entries.iter().enumerate() {
            let col = idx / rows;
            let row = idx % rows;
            let x = inner.x + col as u16 * col_width;
            if x >= inner.x + inner.width || col > 1 {
                break;
            }
            let y = inner.y + row as u16;

            let label = format!("{label}: ");
            let budget = usize::from(col_width).saturating_sub(1);
            let label_len = label.chars().count().min(budget);
            let clipped_label: String = label.chars().take(label_len).collect();
            buf.set_string(x, y, &clipped_label, label_style);

            let value_budget = budget.saturating_sub(label_len);
            let clipped_value: String = value.chars().take(value_budget).collect();
            buf.set_string(x + label_len as u16, y, &clipped_value, value_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_height_covers_two_columns_plus_border() {
        let cards = StatCards {
            title: "Hitting",
            entries: (0..8).map(|i| (format!("S{i}"), i.to_string())).collect(),
        };
        assert_eq!(cards.preferred_height(), 6); // 4 rows of 2 + borders
    }

    #[test]
    fn renders_labels_into_the_buffer() {
        let cards = StatCards {
            title: "Hitting",
            entries: vec![("AVG".into(), ".500".into())],
        };
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        cards.render(area, &mut buf);
        let row: String = (1u16..12).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("AVG"));
    }
}

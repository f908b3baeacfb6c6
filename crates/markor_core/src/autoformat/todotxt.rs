use super::InputFilter;
use chrono::NaiveDate;

/// Starts every new todo.txt task with a creation date.
#[derive(Debug, Clone, Copy)]
pub struct TodoTxtDate {
    date: Option<NaiveDate>,
}

impl TodoTxtDate {
    /// Uses the local date at the time of each newline.
    pub fn today() -> Self {
        Self { date: None }
    }

    /// Always inserts `date`.
    pub fn fixed(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }

    fn date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

impl InputFilter for TodoTxtDate {
    fn filter(&self, _buffer: &str, _edit_position: usize, inserted: &str) -> Option<String> {
        if inserted != "\n" {
            return None;
        }
        Some(format!("\n{} ", self.date().format("%Y-%m-%d")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_date_on_newline() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let filter = TodoTxtDate::fixed(date);
        assert_eq!(filter.filter("(A) task", 8, "\n").as_deref(), Some("\n2024-03-09 "));
        assert_eq!(filter.filter("(A) task", 8, "a"), None);
    }

    #[test]
    fn test_today_is_formatted() {
        let inserted = TodoTxtDate::today().filter("", 0, "\n").unwrap();
        let date = inserted.trim();
        assert!(NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok(), "{date}");
        assert!(inserted.ends_with(' '));
    }
}

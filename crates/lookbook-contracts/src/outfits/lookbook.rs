use serde::Serialize;

use super::record::Outfit;

/// Outfit collection plus the index currently on display. Navigation wraps
/// in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lookbook {
    outfits: Vec<Outfit>,
    cursor: usize,
}

impl Lookbook {
    pub fn new(outfits: Vec<Outfit>) -> Self {
        Self { outfits, cursor: 0 }
    }

    /// Swaps in a new batch and rewinds to the first outfit.
    pub fn replace(&mut self, outfits: Vec<Outfit>) {
        self.outfits = outfits;
        self.cursor = 0;
    }

    pub fn outfits(&self) -> &[Outfit] {
        self.outfits.as_slice()
    }

    pub fn current(&self) -> Option<&Outfit> {
        self.outfits.get(self.cursor)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.outfits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }

    pub fn next(&mut self) -> Option<&Outfit> {
        if self.outfits.is_empty() {
            return None;
        }
        self.cursor = if self.cursor + 1 >= self.outfits.len() {
            0
        } else {
            self.cursor + 1
        };
        self.current()
    }

    pub fn previous(&mut self) -> Option<&Outfit> {
        if self.outfits.is_empty() {
            return None;
        }
        self.cursor = if self.cursor == 0 {
            self.outfits.len() - 1
        } else {
            self.cursor - 1
        };
        self.current()
    }

    /// Indicator click. Out-of-range indices are ignored.
    pub fn jump(&mut self, index: usize) -> bool {
        if index >= self.outfits.len() {
            return false;
        }
        self.cursor = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Lookbook;
    use crate::outfits::Outfit;

    fn titled(titles: &[&str]) -> Lookbook {
        Lookbook::new(
            titles
                .iter()
                .map(|title| Outfit {
                    title: (*title).to_string(),
                    ..Outfit::default()
                })
                .collect(),
        )
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut book = titled(&["a", "b", "c"]);
        assert_eq!(book.previous().map(|o| o.title.as_str()), Some("c"));
        assert_eq!(book.position(), 2);
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut book = titled(&["a", "b", "c"]);
        assert!(book.jump(2));
        assert_eq!(book.next().map(|o| o.title.as_str()), Some("a"));
        assert_eq!(book.position(), 0);
    }

    #[test]
    fn single_outfit_stays_put() {
        let mut book = titled(&["only"]);
        book.next();
        book.previous();
        assert_eq!(book.position(), 0);
    }

    #[test]
    fn empty_navigation_is_noop() {
        let mut book = Lookbook::default();
        assert!(book.next().is_none());
        assert!(book.previous().is_none());
        assert!(!book.jump(0));
        assert!(book.current().is_none());
    }

    #[test]
    fn jump_rejects_out_of_range() {
        let mut book = titled(&["a", "b"]);
        assert!(!book.jump(5));
        assert_eq!(book.position(), 0);
        assert!(book.jump(1));
        assert_eq!(book.current().map(|o| o.title.as_str()), Some("b"));
    }

    #[test]
    fn replace_rewinds_cursor() {
        let mut book = titled(&["a", "b", "c"]);
        book.jump(2);
        book.replace(vec![Outfit::default()]);
        assert_eq!(book.position(), 0);
        assert_eq!(book.len(), 1);
    }
}

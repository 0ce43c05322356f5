/// One stock bar and the pieces cut from it so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    remaining: u64,
    pieces: Vec<u64>,
}

impl Bar {
    pub fn new(stock_length: u64) -> Self {
        Self {
            remaining: stock_length,
            pieces: Vec::new(),
        }
    }

    /// How many more pieces of `length` fit on this bar.
    pub fn room_for(&self, length: u64) -> u64 {
        self.remaining / length
    }

    /// Cuts `count` pieces of `length`. Callers stay within `room_for`.
    pub fn place(&mut self, length: u64, count: u64) {
        debug_assert!(
            count <= self.room_for(length),
            "{count} x {length} exceeds remaining {}",
            self.remaining
        );
        self.remaining -= length * count;
        self.pieces
            .extend(std::iter::repeat_n(length, count as usize));
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn waste(&self) -> u64 {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn into_pieces(self) -> Vec<u64> {
        self.pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bar_is_all_waste() {
        let bar = Bar::new(6000);
        assert!(bar.is_empty());
        assert_eq!(bar.piece_count(), 0);
        assert_eq!(bar.waste(), 6000);
    }

    #[test]
    fn test_place_reduces_capacity() {
        let mut bar = Bar::new(2000);
        bar.place(1200, 1);
        assert_eq!(bar.room_for(800), 1);
        assert_eq!(bar.room_for(801), 0);
        bar.place(800, 1);
        assert_eq!(bar.waste(), 0);
        assert_eq!(bar.into_pieces(), vec![1200, 800]);
    }

    #[test]
    fn test_place_several_of_one_length() {
        let mut bar = Bar::new(1000);
        assert_eq!(bar.room_for(300), 3);
        bar.place(300, 3);
        assert_eq!(bar.piece_count(), 3);
        assert_eq!(bar.waste(), 100);
        bar.place(300, 0);
        assert_eq!(bar.into_pieces(), vec![300, 300, 300]);
    }

    #[test]
    fn test_exact_fit() {
        let bar = Bar::new(3000);
        assert_eq!(bar.room_for(3000), 1);
        assert_eq!(bar.room_for(3001), 0);
    }
}

//! Tests for `PatternBitset` set operations

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::PatternBitset;

    #[test]
    fn test_none_is_empty() {
        let bitset = PatternBitset::none(10);
        assert!(bitset.is_empty());
        assert_eq!(bitset.count(), 0);
        assert_eq!(bitset.first(), None);
    }

    #[test]
    fn test_all_is_full() {
        let bitset = PatternBitset::all(5);
        assert_eq!(bitset.count(), 5);
        for pattern in 0..5 {
            assert!(bitset.contains(pattern));
        }
    }

    #[test]
    fn test_insert_remove_contains() {
        let mut bitset = PatternBitset::none(10);
        bitset.insert(0);
        bitset.insert(7);
        assert!(bitset.contains(0));
        assert!(bitset.contains(7));
        assert!(!bitset.contains(3));

        bitset.remove(0);
        assert!(!bitset.contains(0));
        assert_eq!(bitset.count(), 1);
        assert_eq!(bitset.first(), Some(7));
    }

    #[test]
    fn test_intersection() {
        let mut left = PatternBitset::none(8);
        left.insert(1);
        left.insert(3);
        left.insert(5);

        let mut right = PatternBitset::none(8);
        right.insert(3);
        right.insert(5);
        right.insert(7);

        let intersection = left.intersection(&right);
        assert_eq!(intersection.to_vec(), vec![3, 5]);
    }

    #[test]
    fn test_iter_matches_to_vec() {
        let mut bitset = PatternBitset::none(6);
        bitset.insert(2);
        bitset.insert(4);
        let collected: Vec<usize> = bitset.iter().collect();
        assert_eq!(collected, bitset.to_vec());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut bitset = PatternBitset::none(4);
        bitset.insert(9);
        assert!(bitset.is_empty());
        assert!(!bitset.contains(9));
    }
}

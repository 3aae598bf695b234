//! Order-preserving merge of candidate batches.

use hashbrown::HashSet;

use crate::models::Place;

/// Flatten batches in order, keeping the first place seen for each id.
///
/// Later duplicates are dropped even when their distance or rating differ.
pub fn merge<I>(batches: I) -> Vec<Place>
where
    I: IntoIterator<Item = Vec<Place>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();

    for place in batches.into_iter().flatten() {
        if seen.insert(place.id.clone()) {
            merged.push(place);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn place(id: &str, distance: u32) -> Place {
        let mut p = Place::new(id, format!("place {id}"), Category::Cafe, 37.5, 127.0);
        p.distance_meters = Some(distance);
        p
    }

    #[test]
    fn test_first_seen_wins() {
        let merged = merge(vec![
            vec![place("a", 500), place("b", 100)],
            vec![place("a", 10), place("c", 20)],
        ]);

        let ids: Vec<_> = merged.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        // the nearer duplicate from the second batch is ignored
        assert_eq!(merged[0].distance_meters, Some(500));
    }

    #[test]
    fn test_duplicates_within_one_batch() {
        let merged = merge(vec![vec![place("a", 1), place("a", 2), place("b", 3)]]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_ids_are_unique_after_merge() {
        let batches: Vec<Vec<Place>> = (0..6)
            .map(|b| (0..10).map(|i| place(&((b * 3 + i) % 13).to_string(), i)).collect())
            .collect();
        let merged = merge(batches);
        let unique: HashSet<_> = merged.iter().map(|p| &p.id).collect();
        assert_eq!(unique.len(), merged.len());
        assert_eq!(merged.len(), 13);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge(Vec::<Vec<Place>>::new()).is_empty());
        assert!(merge(vec![Vec::new(), Vec::new()]).is_empty());
    }
}

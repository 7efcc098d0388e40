//! In-memory backend
//!
//! Holds the facts table in process. Used by demo mode and by tests; applies the
//! same filter, ordering and limit rules as the hosted table.

use parking_lot::Mutex;

use super::client::{FactQuery, FactStore, StoreError};
use crate::facts::{Category, Fact, FactId, NewFact, VoteColumn};

/// Year stamped on rows created by this store
const CREATED_IN: i32 = 2024;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Fact>,
    next_id: i64,
}

/// Facts table held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given rows; new ids continue after the largest one
    pub fn with_rows(rows: Vec<Fact>) -> Self {
        let next_id = rows.iter().map(|f| f.id.0).max().unwrap_or(0) + 1;
        Self {
            table: Mutex::new(Table { rows, next_id }),
        }
    }

    /// Store seeded with a handful of facts for demo mode
    pub fn with_sample_facts() -> Self {
        let samples = [
            (
                "The first computer bug was an actual moth found in a relay of the Harvard Mark II",
                "https://en.wikipedia.org/wiki/Software_bug",
                Category::Technology,
                24,
                9,
                4,
            ),
            (
                "Octopuses have three hearts and blue blood",
                "https://en.wikipedia.org/wiki/Octopus",
                Category::Science,
                31,
                17,
                2,
            ),
            (
                "Lisbon is the capital of Portugal",
                "https://en.wikipedia.org/wiki/Lisbon",
                Category::Society,
                40,
                3,
                1,
            ),
            (
                "The Great Wall of China is visible from the Moon with the naked eye",
                "https://en.wikipedia.org/wiki/Great_Wall_of_China",
                Category::History,
                2,
                1,
                19,
            ),
        ];

        let rows = samples
            .into_iter()
            .enumerate()
            .map(|(i, (text, source, category, interesting, mindblowing, false_votes))| Fact {
                id: FactId(i as i64 + 1),
                text: text.to_string(),
                source: source.to_string(),
                category: category.name().to_string(),
                votes_interesting: interesting,
                votes_mindblowing: mindblowing,
                votes_false: false_votes,
                created_in: Some(CREATED_IN),
            })
            .collect();
        Self::with_rows(rows)
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.table.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of a stored row
    pub fn get(&self, id: FactId) -> Option<Fact> {
        self.table.lock().rows.iter().find(|f| f.id == id).cloned()
    }
}

impl FactStore for MemoryStore {
    fn select(&self, query: &FactQuery) -> Result<Vec<Fact>, StoreError> {
        let table = self.table.lock();
        let mut rows: Vec<Fact> = table
            .rows
            .iter()
            .filter(|f| match query.category {
                Some(category) => f.category == category.name(),
                None => true,
            })
            .cloned()
            .collect();

        // Stable sort keeps insertion order among equal counts
        let column = query.order_by;
        if query.descending {
            rows.sort_by(|a, b| column.count(b).cmp(&column.count(a)));
        } else {
            rows.sort_by_key(|f| column.count(f));
        }
        rows.truncate(query.limit);
        Ok(rows)
    }

    fn insert(&self, fact: &NewFact) -> Result<Fact, StoreError> {
        let mut table = self.table.lock();
        if table.next_id == 0 {
            table.next_id = 1;
        }
        let row = Fact {
            id: FactId(table.next_id),
            text: fact.text.clone(),
            source: fact.source.clone(),
            category: fact.category.name().to_string(),
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in: Some(CREATED_IN),
        };
        table.next_id += 1;
        table.rows.push(row.clone());
        log::debug!("Memory store inserted fact {}", row.id);
        Ok(row)
    }

    fn update_votes(&self, id: FactId, column: VoteColumn, count: u32) -> Result<Fact, StoreError> {
        let mut table = self.table.lock();
        let row = table
            .rows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *column.count_mut(row) = count;
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::fact::sample_fact;
    use crate::facts::CategoryFilter;
    use crate::store::FETCH_LIMIT;

    fn fact_in(id: i64, category: Category, interesting: u32) -> Fact {
        let mut fact = sample_fact(id, interesting, 0, 0);
        fact.category = category.name().to_string();
        fact
    }

    #[test]
    fn test_select_orders_and_filters() {
        let store = MemoryStore::with_rows(vec![
            fact_in(1, Category::Science, 3),
            fact_in(2, Category::History, 10),
            fact_in(3, Category::Science, 7),
        ]);

        let all = store
            .select(&FactQuery::for_filter(CategoryFilter::All, FETCH_LIMIT))
            .unwrap();
        let ids: Vec<i64> = all.iter().map(|f| f.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let science = store
            .select(&FactQuery::for_filter(CategoryFilter::Only(Category::Science), FETCH_LIMIT))
            .unwrap();
        let ids: Vec<i64> = science.iter().map(|f| f.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_select_ties_keep_insertion_order() {
        let store = MemoryStore::with_rows(vec![
            fact_in(1, Category::Science, 5),
            fact_in(2, Category::Science, 5),
            fact_in(3, Category::Science, 9),
        ]);
        let rows = store
            .select(&FactQuery::for_filter(CategoryFilter::All, FETCH_LIMIT))
            .unwrap();
        let ids: Vec<i64> = rows.iter().map(|f| f.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_select_respects_limit() {
        let rows = (1..=5).map(|i| fact_in(i, Category::News, i as u32)).collect();
        let store = MemoryStore::with_rows(rows);
        let query = FactQuery::for_filter(CategoryFilter::All, 2);
        assert_eq!(store.select(&query).unwrap().len(), 2);
    }

    #[test]
    fn test_insert_assigns_id_and_zero_votes() {
        let store = MemoryStore::with_sample_facts();
        let before = store.len();
        let row = store
            .insert(&NewFact {
                text: "Bees can fly.".to_string(),
                source: "http://example.com".to_string(),
                category: Category::Science,
            })
            .unwrap();

        assert_eq!(store.len(), before + 1);
        assert_eq!(row.id, FactId(before as i64 + 1));
        assert_eq!(row.category, "science");
        assert_eq!((row.votes_interesting, row.votes_mindblowing, row.votes_false), (0, 0, 0));
    }

    #[test]
    fn test_update_votes() {
        let store = MemoryStore::with_rows(vec![fact_in(7, Category::Health, 1)]);
        let row = store.update_votes(FactId(7), VoteColumn::False, 1).unwrap();
        assert_eq!(row.votes_false, 1);
        assert_eq!(store.get(FactId(7)).unwrap().votes_false, 1);

        assert!(matches!(
            store.update_votes(FactId(8), VoteColumn::False, 1),
            Err(StoreError::NotFound(FactId(8)))
        ));
    }
}

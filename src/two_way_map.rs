use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A bijective table between left and right values.
///
/// The `TwoWayMap` keeps two hash maps in step:
/// - Left values (ontology identifiers) and their right values
/// - Right values (external mappings) and their left values
///
/// Every left value maps to at most one right value and vice versa. Plain
/// [`insert`](Self::insert) overwrites an existing binding on either side,
/// dropping the stale reverse entry, while [`try_insert`](Self::try_insert)
/// refuses to break an existing binding.
///
/// # Examples
///
/// ```
/// use question_ontology::TwoWayMap;
///
/// let mut map = TwoWayMap::new();
/// map.insert("Person".to_string(), 5u64);
///
/// assert_eq!(map.get_by_left("Person"), Some(&5));
/// assert_eq!(map.get_by_right(&5).map(String::as_str), Some("Person"));
///
/// // Rebinding a left value releases its old right value.
/// map.insert("Person".to_string(), 6);
/// assert_eq!(map.get_by_right(&5), None);
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TwoWayMap<L, R> {
    left_to_right: HashMap<L, R>,
    right_to_left: HashMap<R, L>,
}

/// A binding rejected by [`TwoWayMap::try_insert`], carrying the value that
/// already holds one side of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Conflict<L, R> {
    /// The left value is already bound to this right value.
    Left(R),
    /// The right value is already bound to this left value.
    Right(L),
}

impl<L, R> TwoWayMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            left_to_right: HashMap::new(),
            right_to_left: HashMap::new(),
        }
    }

    /// Binds `left` to `right` in both directions.
    ///
    /// Any earlier binding of either value is removed first so that the
    /// table stays a bijection.
    pub fn insert(&mut self, left: L, right: R) {
        Self::_insert(
            left,
            right,
            &mut self.left_to_right,
            &mut self.right_to_left,
        );
    }

    /// Binds `left` to `right` unless either is already bound elsewhere.
    ///
    /// Re-inserting an identical pair succeeds and changes nothing.
    pub fn try_insert(&mut self, left: L, right: R) -> Result<(), Conflict<L, R>> {
        if let Some(existing) = self
            .left_to_right
            .get(&left)
            .filter(|existing| **existing != right)
        {
            return Err(Conflict::Left(existing.clone()));
        }
        if let Some(existing) = self
            .right_to_left
            .get(&right)
            .filter(|existing| **existing != left)
        {
            return Err(Conflict::Right(existing.clone()));
        }
        self.insert(left, right);
        Ok(())
    }

    /// Returns the right value bound to `left`.
    pub fn get_by_left<Q>(&self, left: &Q) -> Option<&R>
    where
        L: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.left_to_right.get(left)
    }

    /// Returns the left value bound to `right`.
    pub fn get_by_right(&self, right: &R) -> Option<&L> {
        self.right_to_left.get(right)
    }

    pub fn is_empty(&self) -> bool {
        self.left_to_right.is_empty()
    }

    pub fn len(&self) -> usize {
        self.left_to_right.len()
    }

    /// Iterates over the bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> {
        self.left_to_right.iter()
    }

    /// The left-to-right direction as an ordered map.
    ///
    /// This is the only direction that is persisted; the reverse direction is
    /// rebuilt on load.
    pub fn to_sorted(&self) -> BTreeMap<L, R>
    where
        L: Ord,
    {
        self.iter()
            .map(|(left, right)| (left.clone(), right.clone()))
            .collect()
    }

    /// Internal helper to insert a pair into both maps.
    ///
    /// When either value is already bound, the old partner's entry in the
    /// opposite map is removed so no stale entries survive.
    fn _insert(
        left: L,
        right: R,
        left_to_right: &mut HashMap<L, R>,
        right_to_left: &mut HashMap<R, L>,
    ) {
        if let Some(old_right) = left_to_right.remove(&left) {
            right_to_left.remove(&old_right);
        }
        if let Some(old_left) = right_to_left.remove(&right) {
            left_to_right.remove(&old_left);
        }

        left_to_right.insert(left.clone(), right.clone());
        right_to_left.insert(right, left);
    }
}

/// Default implementation creates an empty table.
impl<L, R> Default for TwoWayMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    fn default() -> Self { Self::new() }
}

/// Tables are equal when their left-to-right bindings are equal; the reverse
/// direction is always derived from it.
impl<L, R> PartialEq for TwoWayMap<L, R>
where
    L: Eq + Hash,
    R: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.left_to_right == other.left_to_right
    }
}

impl<L, R> Eq for TwoWayMap<L, R>
where
    L: Eq + Hash,
    R: Eq,
{
}

impl<L, R> FromIterator<(L, R)> for TwoWayMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (L, R)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (left, right) in iter {
            map.insert(left, right);
        }
        map
    }
}

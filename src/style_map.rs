use std::collections::BTreeSet;

use crate::paint::Paint;

/// Which segments get painted with which [`Paint`].
///
/// Entries keep their insertion order, which is also the order they are drawn
/// in, so a later entry wins where index sets overlap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
	entries: Vec<(Paint, BTreeSet<u32>)>,
}

impl StyleMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder flavour of [`StyleMap::insert`].
	pub fn with(mut self, paint: Paint, indices: impl IntoIterator<Item = u32>) -> Self {
		self.insert(paint, indices);
		self
	}

	/// Associates `indices` with `paint`. A paint that is already present keeps
	/// its position but has its indices replaced.
	pub fn insert(&mut self, paint: Paint, indices: impl IntoIterator<Item = u32>) {
		let indices = indices.into_iter().collect();
		match self.entries.iter_mut().find(|(existing, _)| *existing == paint) {
			Some((_, set)) => *set = indices,
			None => self.entries.push((paint, indices)),
		}
	}

	pub fn get(&self, paint: &Paint) -> Option<&BTreeSet<u32>> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == paint)
			.map(|(_, set)| set)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Paint, &BTreeSet<u32>)> {
		self.entries.iter().map(|(paint, set)| (paint, set))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<I> FromIterator<(Paint, I)> for StyleMap
where
	I: IntoIterator<Item = u32>,
{
	fn from_iter<T: IntoIterator<Item = (Paint, I)>>(iter: T) -> Self {
		let mut map = Self::new();
		for (paint, indices) in iter {
			map.insert(paint, indices);
		}
		map
	}
}

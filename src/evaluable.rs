use std::rc::Rc;
use std::sync::Arc;

/// The relation the stores search with: an item decides whether a key of
/// type `K` designates it.
///
/// `K` does not have to be the item type, so records can be looked up by
/// name, id or any other projection. An item may implement the trait for
/// several key types.
///
/// ```
/// use evaluators::Evaluable;
///
/// struct User { id: u32, name: String }
///
/// impl Evaluable<u32> for User {
///     fn matches(&self, id: &u32) -> bool { self.id == *id }
/// }
/// impl Evaluable<str> for User {
///     fn matches(&self, name: &str) -> bool { self.name == name }
/// }
///
/// let ada = User { id: 7, name: "ada".into() };
/// assert!(ada.matches(&7));
/// assert!(ada.matches("ada"));
/// ```
pub trait Evaluable<K: ?Sized> {
    fn matches(&self, key: &K) -> bool;
}

impl<K: ?Sized, T: Evaluable<K> + ?Sized> Evaluable<K> for &T {
    fn matches(&self, key: &K) -> bool {
        (**self).matches(key)
    }
}

impl<K: ?Sized, T: Evaluable<K> + ?Sized> Evaluable<K> for Box<T> {
    fn matches(&self, key: &K) -> bool {
        (**self).matches(key)
    }
}

impl<K: ?Sized, T: Evaluable<K> + ?Sized> Evaluable<K> for Rc<T> {
    fn matches(&self, key: &K) -> bool {
        (**self).matches(key)
    }
}

impl<K: ?Sized, T: Evaluable<K> + ?Sized> Evaluable<K> for Arc<T> {
    fn matches(&self, key: &K) -> bool {
        (**self).matches(key)
    }
}

//! Path parameters attached to a request.

use crate::request::Request;

/// Ordered path parameter bindings for one request.
///
/// Built by the dispatcher from the tree's captures and attached to the
/// [`Request`] under a private extension type, so nothing outside this
/// module can collide with the slot. Bindings keep the capture order of
/// the lookup: the deepest capture (a wildcard tail, when present)
/// comes first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathParams {
    items: Vec<(String, String)>,
}

/// Private extension key: only this module can attach or read the bag.
struct ParamsSlot(PathParams);

impl PathParams {
    /// Builds an owned bag from borrowed tree captures.
    pub(crate) fn from_captures(params: &trellis_tree::Params<'_, '_>) -> Self {
        Self {
            items: params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Value of the first binding whose name equals `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over all bindings as (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no parameters were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Attaches the bag to `req`. Called once per request by the
    /// dispatcher, before the handler runs.
    pub(crate) fn attach(self, req: &mut Request) {
        req.insert_extension(ParamsSlot(self));
    }

    /// The parameters attached to `req`, if the matched route captured
    /// any.
    #[must_use]
    pub fn from_request(req: &Request) -> Option<&PathParams> {
        req.get_extension::<ParamsSlot>().map(|slot| &slot.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    fn bag(items: &[(&str, &str)]) -> PathParams {
        PathParams {
            items: items
                .iter()
                .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[test]
    fn by_name_returns_first_binding() {
        let params = bag(&[("id", "42"), ("id", "99")]);
        assert_eq!(params.by_name("id"), Some("42"));
        assert_eq!(params.by_name("missing"), None);
    }

    #[test]
    fn attach_and_retrieve_through_request() {
        let mut req = Request::new(Method::Get, "/users/42");
        assert!(PathParams::from_request(&req).is_none());

        bag(&[("id", "42")]).attach(&mut req);
        let params = PathParams::from_request(&req).unwrap();
        assert_eq!(params.by_name("id"), Some("42"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn bag_is_invisible_to_plain_extensions() {
        // The slot type is private; user extensions of other types
        // cannot shadow or read it.
        let mut req = Request::new(Method::Get, "/");
        bag(&[("a", "1")]).attach(&mut req);
        req.insert_extension(7u64);
        assert_eq!(PathParams::from_request(&req).unwrap().by_name("a"), Some("1"));
        assert_eq!(req.get_extension::<u64>(), Some(&7));
    }
}

//! Snapshot of an add-to-cart form.

/// Name of the hidden field carrying the CSRF token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Action URL plus field values, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartForm {
    action: String,
    fields: Vec<(String, String)>,
}

impl AddToCartForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Replace a field's value, or append it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.get(CSRF_FIELD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_and_token() {
        let mut form = AddToCartForm::new("/cart/add/42/")
            .field(CSRF_FIELD, "tok")
            .field("quantity", "1");
        form.set("quantity", "3");

        assert_eq!(form.action(), "/cart/add/42/");
        assert_eq!(form.csrf_token(), Some("tok"));
        assert_eq!(form.get("quantity"), Some("3"));
        assert_eq!(form.fields().len(), 2);
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(AddToCartForm::new("/cart/add/1/").csrf_token(), None);
    }
}

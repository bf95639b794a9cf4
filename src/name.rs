/// A command name in either its decoded (`"remote add"`) or encoded
/// (`"remote_add"`) form.
///
/// The separator is never stored; callers pass the configured one so the
/// transform stays a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name<'a>(&'a str);

impl<'a> Name<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    /// Spaces to separator.
    pub fn encode(&self, separator: &str) -> String {
        self.0.replace(' ', separator)
    }

    /// Separator to spaces.
    pub fn decode(&self, separator: &str) -> String {
        self.0.replace(separator, " ")
    }

    /// Components of the decoded form, in order.
    pub fn parts(&self, separator: &str) -> Vec<String> {
        self.decode(separator)
            .split(' ')
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_inverts_encode() {
        for s in ["remote add", "status", "a b c", ""] {
            let encoded = Name::new(s).encode("_");
            assert_eq!(Name::new(&encoded).decode("_"), s);
        }
    }

    #[test]
    fn encode_inverts_decode() {
        for e in ["remote_add", "status", "a_b_c"] {
            let decoded = Name::new(e).decode("_");
            assert_eq!(Name::new(&decoded).encode("_"), e);
        }
    }

    #[test]
    fn multi_char_separator() {
        assert_eq!(Name::new("remote add").encode("--"), "remote--add");
        assert_eq!(Name::new("remote--add").decode("--"), "remote add");
    }

    #[test]
    fn parts_split_decoded_form() {
        assert_eq!(Name::new("bar_baz").parts("_"), vec!["bar", "baz"]);
        assert_eq!(Name::new("bar").parts("_"), vec!["bar"]);
        assert_eq!(Name::new("bar-baz").parts("-"), vec!["bar", "baz"]);
    }
}

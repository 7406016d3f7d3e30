/// A set of case-insensitive file name suffixes.
///
/// Suffixes are compared literally against the end of the whole file name,
/// so multi-part suffixes like `.tar.gz` work and a leading dot is only
/// required if the caller includes one.
///
/// # Parsing
///
/// - a string without a comma is a single suffix, taken verbatim
/// - a string with commas is split on `,` and each piece is trimmed
/// - a list of strings is taken as-is
///
/// ```rust
/// use getfiles::Extensions;
///
/// let exts = Extensions::from(".txt, .LOG");
/// assert!(exts.matches("notes.txt"));
/// assert!(exts.matches("APP.log"));
/// assert!(!exts.matches("main.rs"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions {
    suffixes: Vec<String>,
}

impl Extensions {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Parse a caller-supplied string, splitting on commas when present.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(',') {
            Self::new(raw.split(',').map(str::trim))
        } else {
            Self::new([raw])
        }
    }

    /// Returns `true` if the lowercased `name` ends with any suffix.
    ///
    /// An empty set matches nothing.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

impl From<&str> for Extensions {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Extensions {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&String> for Extensions {
    fn from(raw: &String) -> Self {
        Self::parse(raw)
    }
}

impl From<Vec<String>> for Extensions {
    fn from(list: Vec<String>) -> Self {
        Self::new(list)
    }
}

impl From<Vec<&str>> for Extensions {
    fn from(list: Vec<&str>) -> Self {
        Self::new(list)
    }
}

impl From<&[&str]> for Extensions {
    fn from(list: &[&str]) -> Self {
        Self::new(list)
    }
}

impl<const N: usize> From<[&str; N]> for Extensions {
    fn from(list: [&str; N]) -> Self {
        Self::new(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_suffix_is_verbatim() {
        let exts = Extensions::from(".txt");
        assert_eq!(exts.suffixes(), [".txt"]);
    }

    #[test]
    fn comma_string_is_split_and_trimmed() {
        let exts = Extensions::from(".txt, .log ,.csv");
        assert_eq!(exts.suffixes(), [".txt", ".log", ".csv"]);
    }

    #[test]
    fn comma_string_equals_list() {
        assert_eq!(Extensions::from(".txt, .log"), Extensions::from(vec![".txt", ".log"]));
    }

    #[test]
    fn matching_ignores_case_on_both_sides() {
        let exts = Extensions::from(".TXT");
        assert!(exts.matches("FILE.TXT"));
        assert!(exts.matches("file.txt"));
        assert!(!exts.matches("file.txt.bak"));
    }

    #[test]
    fn multi_part_suffix() {
        let exts = Extensions::from(vec![".tar.gz"]);
        assert!(exts.matches("backup.TAR.GZ"));
        assert!(!exts.matches("backup.gz"));
    }

    #[test]
    fn suffix_without_dot_matches_name_ending() {
        let exts = Extensions::from("log");
        assert!(exts.matches("changelog"));
        assert!(exts.matches("app.log"));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let exts = Extensions::new(Vec::<String>::new());
        assert!(exts.is_empty());
        assert!(!exts.matches("a.txt"));
    }
}

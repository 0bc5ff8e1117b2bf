use std::fmt;
use std::slice;


/// The width to which labels are padded when a report is rendered as text.
pub const LABEL_WIDTH: usize = 25;


/// A single labeled value of a report.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Field {
    pub label: String,
    pub value: String,
}
impl Field {
    pub fn new<L: Into<String>, V: Into<String>>(label: L, value: V) -> Field {
        Field {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Section markers are fields whose label is framed in dashes; they carry no value.
    pub fn is_section(&self) -> bool {
        self.label.starts_with("---")
    }
}


/// An ordered list of labeled values describing a calculation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    fields: Vec<Field>,
}
impl Report {
    pub fn new() -> Report {
        Report::default()
    }

    pub fn push<L: Into<String>, V: ToString>(&mut self, label: L, value: V) {
        self.fields.push(Field::new(label, value.to_string()));
    }

    pub fn push_section<L: Into<String>>(&mut self, label: L) {
        self.fields.push(Field::new(label, ""));
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the value of the first field with the given label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.fields.iter()
            .map(|f| f.label.as_str())
            .collect()
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn iter(&self) -> slice::Iter<'_, Field> {
        self.fields.iter()
    }
}
impl IntoIterator for Report {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
impl<'a> IntoIterator for &'a Report {
    type Item = &'a Field;
    type IntoIter = slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            if field.is_section() {
                writeln!(f)?;
                writeln!(f, "{}", field.label)?;
            } else {
                writeln!(f, "{:<width$}: {}", field.label, field.value, width = LABEL_WIDTH)?;
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Report {
        let mut report = Report::new();
        report.push("IP Version", "IPv4");
        report.push("CIDR", "/24");
        report.push_section("--- Subnetting ---");
        report.push("Number of Subnets", "4 (using /26)");
        report
    }

    #[test]
    fn test_lookup() {
        let report = sample();
        assert_eq!(4, report.len());
        assert_eq!(Some("IPv4"), report.get("IP Version"));
        assert_eq!(Some(""), report.get("--- Subnetting ---"));
        assert_eq!(None, report.get("Netmask"));
        assert_eq!(
            vec!["IP Version", "CIDR", "--- Subnetting ---", "Number of Subnets"],
            report.labels(),
        );

        let sections: Vec<&Field> = report.iter().filter(|f| f.is_section()).collect();
        assert_eq!(1, sections.len());
    }

    #[test]
    fn test_render() {
        let expected = concat!(
            "IP Version               : IPv4\n",
            "CIDR                     : /24\n",
            "\n",
            "--- Subnetting ---\n",
            "Number of Subnets        : 4 (using /26)\n",
        );
        assert_eq!(expected, sample().to_string());
        assert_eq!("", Report::new().to_string());
    }

    #[test]
    fn test_push_numbers() {
        let mut report = Report::new();
        report.push("Usable Hosts", 254u32);
        assert_eq!(Some("254"), report.get("Usable Hosts"));
        assert_eq!(
            vec![Field::new("Usable Hosts", "254")],
            report.into_iter().collect::<Vec<_>>(),
        );
    }
}

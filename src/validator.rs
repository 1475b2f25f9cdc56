//! Validator Fragment
//!
//! Serializes the page (doctype plus the live root element) into the text the
//! W3C markup validator accepts as a direct-input fragment, and deposits it
//! into the validator form's hidden field.

use serde::Deserialize;

use crate::document::{Doctype, Document};

/// Default validator form action
pub const VALIDATOR_CHECK_URL: &str = "https://validator.w3.org/check";

/// Default name of the field receiving the fragment
pub const FRAGMENT_FIELD: &str = "fragment";

/// Identifies the form field to populate: the `<form>` whose `action` equals
/// `form_action`, and its direct child `<input>` named `field_name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidatorTarget {
    pub form_action: String,
    pub field_name: String,
}

impl Default for ValidatorTarget {
    fn default() -> Self {
        Self {
            form_action: VALIDATOR_CHECK_URL.to_string(),
            field_name: FRAGMENT_FIELD.to_string(),
        }
    }
}

/// What happened when populating the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The field now holds the fragment
    Populated { bytes: usize },
    /// The form or the field is not on the page; nothing was set
    MissingTarget,
    /// The page has no doctype to serialize; nothing was set
    MissingDoctype,
}

impl std::fmt::Display for FieldOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldOutcome::Populated { bytes } => write!(f, "populated ({} bytes)", bytes),
            FieldOutcome::MissingTarget => write!(f, "skipped (validator form not found)"),
            FieldOutcome::MissingDoctype => write!(f, "skipped (document has no doctype)"),
        }
    }
}

/// Build the `<!DOCTYPE ...>` declaration for a doctype
///
/// The system identifier is quoted after either `PUBLIC "p"` or the bare
/// `SYSTEM` keyword; `SYSTEM` is only written when there is no public id.
pub fn doctype_declaration(doctype: &Doctype) -> String {
    let mut out = String::from("<!DOCTYPE ");
    out.push_str(&doctype.name);

    if let Some(public_id) = &doctype.public_id {
        out.push_str(" PUBLIC \"");
        out.push_str(public_id);
        out.push('"');
    } else if doctype.system_id.is_some() {
        out.push_str(" SYSTEM");
    }

    if let Some(system_id) = &doctype.system_id {
        out.push_str(" \"");
        out.push_str(system_id);
        out.push('"');
    }

    out.push('>');
    out
}

/// Declaration, newline, then the root element's outer HTML
pub fn validator_markup(document: &Document) -> Option<String> {
    let doctype = document.doctype()?;
    let mut out = doctype_declaration(doctype);
    out.push('\n');
    out.push_str(&document.root().outer_html());
    Some(out)
}

/// Serialize the document and set the target field's value
///
/// The markup is taken before the field changes, so it contains the form
/// being populated. Only the field's live value is written; its attributes
/// are untouched.
pub fn populate_fragment_field(document: &mut Document, target: &ValidatorTarget) -> FieldOutcome {
    let field_present = document
        .form_field(&target.form_action, &target.field_name)
        .is_some();

    if !field_present {
        tracing::debug!(
            action = %target.form_action,
            field = %target.field_name,
            "Validator field not present, skipping"
        );
        return FieldOutcome::MissingTarget;
    }

    let Some(markup) = validator_markup(document) else {
        tracing::warn!("Document has no doctype, validator field left empty");
        return FieldOutcome::MissingDoctype;
    };

    let bytes = markup.len();
    if let Some(field) = document.form_field_mut(&target.form_action, &target.field_name) {
        field.set_value(markup);
    }

    tracing::debug!(bytes, "Validator field populated");
    FieldOutcome::Populated { bytes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;

    fn page(doctype: Option<Doctype>) -> Document {
        let root = Element::new("html").child(
            Element::new("body").child(
                Element::new("form")
                    .attr("action", VALIDATOR_CHECK_URL)
                    .attr("method", "post")
                    .child(Element::new("input").attr("name", "fragment").attr("type", "hidden")),
            ),
        );
        Document::new(doctype, root)
    }

    fn fragment_value(doc: &Document) -> Option<String> {
        doc.form_field(VALIDATOR_CHECK_URL, "fragment")
            .and_then(|i| i.value.clone())
    }

    #[test]
    fn test_html5_declaration() {
        let doc = page(Some(Doctype::html5()));
        let markup = validator_markup(&doc).unwrap();
        assert!(markup.starts_with("<!DOCTYPE html>\n<html>"));
        assert_eq!(
            markup,
            format!("<!DOCTYPE html>\n{}", doc.root().outer_html())
        );
    }

    #[test]
    fn test_public_and_system_declaration() {
        let doctype = Doctype::new("html").public_id("P").system_id("S");
        assert_eq!(doctype_declaration(&doctype), r#"<!DOCTYPE html PUBLIC "P" "S">"#);
    }

    #[test]
    fn test_public_only_declaration() {
        let doctype = Doctype::new("html").public_id("-//W3C//DTD HTML 4.01//EN");
        assert_eq!(
            doctype_declaration(&doctype),
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN">"#
        );
    }

    #[test]
    fn test_system_only_declaration() {
        let doctype = Doctype::new("html").system_id("about:legacy-compat");
        assert_eq!(
            doctype_declaration(&doctype),
            r#"<!DOCTYPE html SYSTEM "about:legacy-compat">"#
        );
    }

    #[test]
    fn test_populate_includes_own_form() {
        let mut doc = page(Some(Doctype::html5()));
        let outcome = populate_fragment_field(&mut doc, &ValidatorTarget::default());

        let value = fragment_value(&doc).unwrap();
        assert_eq!(outcome, FieldOutcome::Populated { bytes: value.len() });
        assert!(value.contains(r#"<form action="https://validator.w3.org/check""#));
        assert!(value.contains(r#"<input name="fragment" type="hidden">"#));
    }

    #[test]
    fn test_populated_value_not_reflected_in_markup() {
        let mut doc = page(Some(Doctype::html5()));
        let before = validator_markup(&doc).unwrap();
        populate_fragment_field(&mut doc, &ValidatorTarget::default());
        assert_eq!(validator_markup(&doc).unwrap(), before);
    }

    #[test]
    fn test_missing_form_is_noop() {
        let mut doc = Document::new(
            Some(Doctype::html5()),
            Element::new("html").child(Element::new("body")),
        );
        let before = doc.clone();
        let outcome = populate_fragment_field(&mut doc, &ValidatorTarget::default());
        assert_eq!(outcome, FieldOutcome::MissingTarget);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_wrong_field_name_is_noop() {
        let mut doc = page(Some(Doctype::html5()));
        let target = ValidatorTarget {
            field_name: "uri".to_string(),
            ..ValidatorTarget::default()
        };
        assert_eq!(populate_fragment_field(&mut doc, &target), FieldOutcome::MissingTarget);
        assert_eq!(fragment_value(&doc), None);
    }

    #[test]
    fn test_missing_doctype_is_noop() {
        let mut doc = page(None);
        let outcome = populate_fragment_field(&mut doc, &ValidatorTarget::default());
        assert_eq!(outcome, FieldOutcome::MissingDoctype);
        assert_eq!(fragment_value(&doc), None);
    }

    #[test]
    fn test_second_matching_form_is_populated() {
        let root = Element::new("html").child(
            Element::new("body")
                .child(
                    Element::new("form")
                        .attr("action", VALIDATOR_CHECK_URL)
                        .child(Element::new("input").attr("name", "uri")),
                )
                .child(
                    Element::new("form")
                        .attr("action", VALIDATOR_CHECK_URL)
                        .attr("id", "fragment-form")
                        .child(Element::new("input").attr("name", "fragment")),
                ),
        );
        let mut doc = Document::new(Some(Doctype::html5()), root);

        let outcome = populate_fragment_field(&mut doc, &ValidatorTarget::default());
        let value = fragment_value(&doc).unwrap();
        assert_eq!(outcome, FieldOutcome::Populated { bytes: value.len() });

        let second = doc.element_by_id("fragment-form").unwrap();
        assert_eq!(
            second.child_input_named("fragment").and_then(|i| i.value.as_deref()),
            Some(value.as_str())
        );
    }

    #[test]
    fn test_parsed_legacy_page_end_to_end() {
        let html = concat!(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "#,
            r#""http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#,
            r#"<title>Jar</title><script>if (n < 6) {}</script>"#,
            r#"<p>1 < 2<form action="https://validator.w3.org/check">"#,
            r#"<input name="fragment" type="hidden"></form>"#,
        );
        let mut doc = Document::parse_html(html).unwrap();

        let outcome = populate_fragment_field(&mut doc, &ValidatorTarget::default());

        let expected = concat!(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "#,
            r#""http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#,
            "\n",
            r#"<html><head><title>Jar</title><script>if (n < 6) {}</script></head>"#,
            r#"<body><p>1 &lt; 2</p><form action="https://validator.w3.org/check">"#,
            r#"<input name="fragment" type="hidden"></form></body></html>"#,
        );
        assert_eq!(fragment_value(&doc).as_deref(), Some(expected));
        assert_eq!(outcome, FieldOutcome::Populated { bytes: expected.len() });
    }
}

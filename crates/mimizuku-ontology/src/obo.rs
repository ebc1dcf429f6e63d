//! OBO フォーマットのパーサ。
//!
//! スタンザ指向の行フォーマットを逐次読みします。分類に関係するのは
//! `[Term]` / `[Typedef]` スタンザと is_a / relationship /
//! intersection_of 行で、それ以外のスタンザは読み飛ばします。

use crate::error::ParseError;
use crate::model::{IntersectionPart, OntologyDocument, Relationship, Synonym, Term, TypeDef};
use std::io::BufRead;

/// Parses an OBO-format ontology from the reader.
pub fn parse_obo<R: BufRead>(reader: R) -> Result<OntologyDocument, ParseError> {
    let mut doc = OntologyDocument::default();
    let mut lines = reader.lines();

    // Header: key-value lines up to the first stanza.
    let mut pending: Option<String> = None;
    for line in lines.by_ref() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') {
            pending = Some(line);
            break;
        }
        parse_header_line(&mut doc, &line);
    }

    // Stanza loop. Each body parser returns the header of the stanza that
    // terminated it, if any.
    while let Some(stanza) = pending.take() {
        match stanza.as_str() {
            "[Term]" => {
                let (term, next) = parse_term(&mut lines)?;
                doc.terms.push(term);
                pending = next;
            }
            "[Typedef]" => {
                let (td, next) = parse_typedef(&mut lines)?;
                doc.typedefs.push(td);
                pending = next;
            }
            _ => {
                pending = skip_stanza(&mut lines)?;
            }
        }
    }

    Ok(doc)
}

fn parse_header_line(doc: &mut OntologyDocument, line: &str) {
    let Some((key, val)) = line.split_once(": ") else {
        return;
    };
    match key {
        "format-version" => doc.format_version = Some(val.to_string()),
        "data-version" => doc.data_version = Some(val.to_string()),
        "ontology" => doc.name = Some(val.to_string()),
        _ => {}
    }
}

type Lines<'a, R> = &'a mut std::io::Lines<R>;

/// Reads stanza body lines until a blank line, EOF, or the next stanza
/// header, which is handed back to the caller.
fn each_stanza_line<R: BufRead>(
    lines: Lines<R>,
    mut f: impl FnMut(&str, &str),
) -> Result<Option<String>, ParseError> {
    for line in lines {
        let line = line?;
        if line.is_empty() {
            return Ok(None);
        }
        if line.starts_with('[') {
            return Ok(Some(line));
        }
        if let Some((key, val)) = line.split_once(": ") {
            f(key, val);
        }
    }
    Ok(None)
}

fn skip_stanza<R: BufRead>(lines: Lines<R>) -> Result<Option<String>, ParseError> {
    each_stanza_line(lines, |_, _| {})
}

fn parse_term<R: BufRead>(lines: Lines<R>) -> Result<(Term, Option<String>), ParseError> {
    let mut t = Term::default();
    let next = each_stanza_line(lines, |key, val| match key {
        "id" => t.id = val.to_string(),
        "name" => t.name = Some(val.to_string()),
        "namespace" => t.namespace = Some(val.to_string()),
        "def" => t.definition = Some(parse_quoted(val).to_string()),
        "subset" => t.subsets.push(val.to_string()),
        "synonym" => t.synonyms.push(parse_synonym(val)),
        "xref" => t.xrefs.push(val.to_string()),
        "alt_id" => t.alt_ids.push(val.to_string()),
        "is_a" => t.relationships.push(parse_is_a(val)),
        "relationship" => {
            if let Some(rel) = parse_relationship(val) {
                t.relationships.push(rel);
            }
        }
        "intersection_of" => t.intersection_of.push(parse_intersection_of(val)),
        "is_obsolete" => t.is_obsolete = val == "true",
        _ => {}
    })?;
    Ok((t, next))
}

fn parse_typedef<R: BufRead>(lines: Lines<R>) -> Result<(TypeDef, Option<String>), ParseError> {
    let mut td = TypeDef::default();
    let next = each_stanza_line(lines, |key, val| match key {
        "id" => td.id = val.to_string(),
        "name" => td.name = Some(val.to_string()),
        _ => {}
    })?;
    Ok((td, next))
}

/// Extracts the text between the first pair of double quotes.
fn parse_quoted(s: &str) -> &str {
    let Some(start) = s.find('"') else {
        return s;
    };
    let rest = &s[start + 1..];
    match rest.find('"') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// Parses `"text" SCOPE [xrefs]`.
fn parse_synonym(s: &str) -> Synonym {
    let text = parse_quoted(s).to_string();

    let rest = s
        .find('"')
        .and_then(|start| {
            let after = &s[start + 1..];
            after.find('"').map(|end| &after[end + 1..])
        })
        .unwrap_or("");

    let scope = rest
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    let xrefs = match (rest.find('['), rest.rfind(']')) {
        (Some(open), Some(close)) if close > open + 1 => rest[open + 1..close]
            .split(", ")
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Synonym { text, scope, xrefs }
}

/// Parses `CHEBI:12345 ! name`.
fn parse_is_a(val: &str) -> Relationship {
    let (id, name) = split_comment(val);
    Relationship {
        rel_type: crate::model::IS_A.to_string(),
        target_id: id.to_string(),
        name: name.map(str::to_string),
    }
}

/// Parses `type CHEBI:12345 ! name`.
fn parse_relationship(val: &str) -> Option<Relationship> {
    let (rel_type, rest) = val.split_once(' ')?;
    let (id, name) = split_comment(rest);
    Some(Relationship {
        rel_type: rel_type.to_string(),
        target_id: id.to_string(),
        name: name.map(str::to_string),
    })
}

/// Parses `CHEBI:12345` (genus) or `relationship CHEBI:12345` (differentia).
fn parse_intersection_of(val: &str) -> IntersectionPart {
    let (body, _) = split_comment(val);
    match body.split_once(' ') {
        Some((rel, target)) => IntersectionPart {
            relationship: Some(rel.to_string()),
            target_id: target.to_string(),
        },
        None => IntersectionPart {
            relationship: None,
            target_id: body.to_string(),
        },
    }
}

/// Splits off an OBO trailing comment: `value ! comment`.
fn split_comment(val: &str) -> (&str, Option<&str>) {
    match val.split_once(" ! ") {
        Some((v, c)) => (v.trim(), Some(c.trim())),
        None => (val.trim(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
format-version: 1.2
data-version: 239
ontology: chebi

[Term]
id: CHEBI:33579
name: main group molecular entity
namespace: chebi_ontology
def: \"A main group molecular entity is...\" [src:def]
is_a: CHEBI:23367 ! molecular entity
synonym: \"main group compounds\" RELATED [ChEBI]
xref: Wikipedia:Main_group_element

[Term]
id: CHEBI:24431
name: chemical entity
relationship: has_part CHEBI:33579 ! main group molecular entity
intersection_of: CHEBI:50047 ! organic amino compound
intersection_of: has_part CHEBI:85259

[Term]
id: CHEBI:99999
is_obsolete: true

[Typedef]
id: has_part
name: has part
";

    #[test]
    fn parses_header() {
        let doc = parse_obo(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(doc.format_version.as_deref(), Some("1.2"));
        assert_eq!(doc.data_version.as_deref(), Some("239"));
        assert_eq!(doc.name.as_deref(), Some("chebi"));
    }

    #[test]
    fn parses_terms_with_relationships() {
        let doc = parse_obo(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(doc.terms.len(), 3);

        let first = &doc.terms[0];
        assert_eq!(first.id, "CHEBI:33579");
        assert_eq!(first.name.as_deref(), Some("main group molecular entity"));
        assert_eq!(first.definition.as_deref(), Some("A main group molecular entity is..."));
        assert_eq!(first.relationships, vec![Relationship {
            rel_type: "is_a".to_string(),
            target_id: "CHEBI:23367".to_string(),
            name: Some("molecular entity".to_string()),
        }]);
        assert_eq!(first.xrefs, vec!["Wikipedia:Main_group_element"]);

        let second = &doc.terms[1];
        assert_eq!(second.relationships[0].rel_type, "has_part");
        assert_eq!(second.relationships[0].target_id, "CHEBI:33579");
    }

    #[test]
    fn parses_intersection_of_genus_and_differentia() {
        let doc = parse_obo(Cursor::new(SAMPLE)).unwrap();
        let parts = &doc.terms[1].intersection_of;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], IntersectionPart {
            relationship: None,
            target_id: "CHEBI:50047".to_string(),
        });
        assert_eq!(parts[1], IntersectionPart {
            relationship: Some("has_part".to_string()),
            target_id: "CHEBI:85259".to_string(),
        });
    }

    #[test]
    fn parses_synonym_scope_and_xrefs() {
        let doc = parse_obo(Cursor::new(SAMPLE)).unwrap();
        let syn = &doc.terms[0].synonyms[0];
        assert_eq!(syn.text, "main group compounds");
        assert_eq!(syn.scope, "RELATED");
        assert_eq!(syn.xrefs, vec!["ChEBI"]);
    }

    #[test]
    fn marks_obsolete_terms() {
        let doc = parse_obo(Cursor::new(SAMPLE)).unwrap();
        assert!(doc.terms[2].is_obsolete);
        assert!(!doc.terms[0].is_obsolete);
    }

    #[test]
    fn parses_typedefs() {
        let doc = parse_obo(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(doc.typedefs.len(), 1);
        assert_eq!(doc.typedefs[0].id, "has_part");
        assert_eq!(doc.typedefs[0].name.as_deref(), Some("has part"));
    }

    #[test]
    fn skips_unknown_stanzas() {
        let input = "\
[Instance]
id: something

[Term]
id: X:1
";
        let doc = parse_obo(Cursor::new(input)).unwrap();
        assert_eq!(doc.terms.len(), 1);
        assert_eq!(doc.terms[0].id, "X:1");
    }

    #[test]
    fn stanza_without_blank_separator_still_terminates() {
        let input = "\
[Term]
id: X:1
[Term]
id: X:2
";
        let doc = parse_obo(Cursor::new(input)).unwrap();
        assert_eq!(doc.terms.len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_document() {
        let doc = parse_obo(Cursor::new("")).unwrap();
        assert!(doc.terms.is_empty());
        assert!(doc.typedefs.is_empty());
    }
}

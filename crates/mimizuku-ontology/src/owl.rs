//! OWL/RDF-XML パーサ。
//!
//! ストリーミングでイベントを読み、分類に使う要素だけ拾います:
//! owl:Class、owl:ObjectProperty、rdfs:subClassOf (単純参照と
//! owl:Restriction / owl:someValuesFrom)、owl:deprecated。

use crate::error::ParseError;
use crate::model::{OntologyDocument, Relationship, Synonym, Term, TypeDef};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

const NS_OBO: &str = "http://purl.obolibrary.org/obo/";

/// Parses an OWL/RDF-XML ontology from the reader.
///
/// Elements are matched by their conventional prefixes (`owl:`, `rdf:`,
/// `rdfs:`), which OBO Foundry exports use without exception.
pub fn parse_owl<R: BufRead>(reader: R) -> Result<OntologyDocument, ParseError> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);
    xml.expand_empty_elements(true);

    let mut doc = OntologyDocument::default();
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"rdf:RDF" => {} // container, descend
                b"owl:Ontology" => parse_ontology_header(&mut xml, &e, &mut doc)?,
                b"owl:Class" => {
                    let term = parse_class(&mut xml, &e)?;
                    if !term.id.is_empty() {
                        doc.terms.push(term);
                    }
                }
                b"owl:ObjectProperty" => {
                    let td = parse_object_property(&mut xml, &e)?;
                    if !td.id.is_empty() {
                        doc.typedefs.push(td);
                    }
                }
                _ => skip_element(&mut xml)?,
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(doc)
}

/// Converts `http://purl.obolibrary.org/obo/CHEBI_12345` to `CHEBI:12345`.
/// Other IRIs pass through unchanged.
fn obo_id_from_iri(iri: &str) -> String {
    let Some(local) = iri.strip_prefix(NS_OBO) else {
        return iri.to_string();
    };
    match local.split_once('_') {
        Some((prefix, rest)) => format!("{}:{}", prefix, rest),
        None => local.to_string(),
    }
}

fn get_attr(el: &BytesStart<'_>, name: &str) -> Result<Option<String>, ParseError> {
    Ok(el
        .try_get_attribute(name)?
        .map(|a| a.unescape_value().map(|v| v.into_owned()))
        .transpose()?)
}

/// Consumes events up to and including the end of the current element.
fn skip_element<R: BufRead>(xml: &mut Reader<R>) -> Result<(), ParseError> {
    let mut depth = 0usize;
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Event::Eof => return Ok(()),
            _ => {}
        }
        buf.clear();
    }
}

/// Collects the character data of the current element, including text in
/// nested elements, up to its end tag.
fn read_char_data<R: BufRead>(xml: &mut Reader<R>) -> Result<String, ParseError> {
    let mut out = String::new();
    let mut depth = 0usize;
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::Text(t) => out.push_str(&t.unescape()?),
            Event::End(_) => {
                if depth == 0 {
                    return Ok(out);
                }
                depth -= 1;
            }
            Event::Eof => return Ok(out),
            _ => {}
        }
        buf.clear();
    }
}

fn parse_ontology_header<R: BufRead>(
    xml: &mut Reader<R>,
    start: &BytesStart<'_>,
    doc: &mut OntologyDocument,
) -> Result<(), ParseError> {
    if let Some(about) = get_attr(start, "rdf:about")? {
        doc.name = Some(about);
    }

    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(el) => {
                if el.local_name().as_ref() == b"versionIRI" {
                    if let Some(v) = get_attr(&el, "rdf:resource")? {
                        doc.data_version = Some(v);
                    }
                }
                skip_element(xml)?;
            }
            Event::End(_) | Event::Eof => return Ok(()),
            _ => {}
        }
        buf.clear();
    }
}

fn parse_class<R: BufRead>(
    xml: &mut Reader<R>,
    start: &BytesStart<'_>,
) -> Result<Term, ParseError> {
    let mut term = Term::default();
    if let Some(about) = get_attr(start, "rdf:about")? {
        term.id = obo_id_from_iri(&about);
    }

    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(el) => match el.local_name().as_ref() {
                b"label" => term.name = Some(read_char_data(xml)?),
                b"subClassOf" => {
                    if let Some(res) = get_attr(&el, "rdf:resource")? {
                        term.relationships.push(Relationship::is_a(obo_id_from_iri(&res)));
                        skip_element(xml)?;
                    } else if let Some(rel) = parse_restriction(xml)? {
                        term.relationships.push(rel);
                    }
                }
                b"deprecated" => term.is_obsolete = read_char_data(xml)? == "true",
                b"hasAlternativeId" => term.alt_ids.push(read_char_data(xml)?),
                b"hasOBONamespace" => term.namespace = Some(read_char_data(xml)?),
                b"IAO_0000115" | b"Definition" | b"definition" => {
                    term.definition = Some(read_char_data(xml)?)
                }
                b"hasExactSynonym" => push_synonym(&mut term, xml, "EXACT")?,
                b"hasBroadSynonym" => push_synonym(&mut term, xml, "BROAD")?,
                b"hasNarrowSynonym" => push_synonym(&mut term, xml, "NARROW")?,
                b"hasRelatedSynonym" => push_synonym(&mut term, xml, "RELATED")?,
                b"hasDbXref" => term.xrefs.push(read_char_data(xml)?),
                b"inSubset" => {
                    if let Some(res) = get_attr(&el, "rdf:resource")? {
                        term.subsets.push(obo_id_from_iri(&res));
                    }
                    skip_element(xml)?;
                }
                _ => skip_element(xml)?,
            },
            Event::End(_) | Event::Eof => return Ok(term),
            _ => {}
        }
        buf.clear();
    }
}

fn push_synonym<R: BufRead>(
    term: &mut Term,
    xml: &mut Reader<R>,
    scope: &str,
) -> Result<(), ParseError> {
    term.synonyms.push(Synonym {
        text: read_char_data(xml)?,
        scope: scope.to_string(),
        xrefs: Vec::new(),
    });
    Ok(())
}

/// Parses the body of an rdfs:subClassOf holding an owl:Restriction with
/// onProperty and someValuesFrom.
fn parse_restriction<R: BufRead>(
    xml: &mut Reader<R>,
) -> Result<Option<Relationship>, ParseError> {
    let mut rel_type: Option<String> = None;
    let mut target: Option<String> = None;

    let mut depth = 0usize;
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(el) => {
                depth += 1;
                match el.local_name().as_ref() {
                    b"onProperty" => {
                        if let Some(res) = get_attr(&el, "rdf:resource")? {
                            rel_type = Some(obo_id_from_iri(&res));
                        }
                    }
                    b"someValuesFrom" => {
                        if let Some(res) = get_attr(&el, "rdf:resource")? {
                            target = Some(obo_id_from_iri(&res));
                        }
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(match (rel_type, target) {
        (Some(rel_type), Some(target_id)) => Some(Relationship {
            rel_type,
            target_id,
            name: None,
        }),
        _ => None,
    })
}

fn parse_object_property<R: BufRead>(
    xml: &mut Reader<R>,
    start: &BytesStart<'_>,
) -> Result<TypeDef, ParseError> {
    let mut td = TypeDef::default();
    if let Some(about) = get_attr(start, "rdf:about")? {
        td.id = obo_id_from_iri(&about);
    }

    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(el) => {
                if el.local_name().as_ref() == b"label" {
                    td.name = Some(read_char_data(xml)?);
                } else {
                    skip_element(xml)?;
                }
            }
            Event::End(_) | Event::Eof => return Ok(td),
            _ => {}
        }
        buf.clear();
    }
}

//! Structured author extraction over well-formed detail XML
//!
//! Primary extraction strategy: a streaming walk of `AuthorList`/`Author`
//! elements. Payloads that are not well-formed XML, or that encode their
//! author list some other way, yield an error or an empty result and the
//! caller falls back to the pattern-based strategies.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::RawAuthor;

pub(super) fn extract_authors(xml: &str) -> Result<Vec<RawAuthor>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut authors: Vec<RawAuthor> = Vec::new();

    let mut in_author_list = false;
    let mut in_author = false;
    let mut in_last_name = false;
    let mut in_fore_name = false;
    let mut in_collective_name = false;
    let mut in_affiliation = false;
    let mut in_email = false;

    let mut current = RawAuthor::default();
    let mut current_affiliation = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"AuthorList" => in_author_list = true,
                b"Author" if in_author_list => {
                    in_author = true;
                    current = RawAuthor::default();
                }
                b"LastName" if in_author => in_last_name = true,
                b"ForeName" if in_author => in_fore_name = true,
                b"CollectiveName" if in_author => in_collective_name = true,
                b"Affiliation" if in_author => {
                    in_affiliation = true;
                    current_affiliation.clear();
                }
                b"Email" if in_author => in_email = true,
                _ => {}
            },
            Event::End(ref e) => match e.name().as_ref() {
                b"AuthorList" => in_author_list = false,
                b"Author" => {
                    if in_author {
                        authors.push(std::mem::take(&mut current));
                        in_author = false;
                    }
                }
                b"LastName" => in_last_name = false,
                b"ForeName" => in_fore_name = false,
                b"CollectiveName" => in_collective_name = false,
                b"Affiliation" => {
                    if in_affiliation && !current_affiliation.is_empty() {
                        current.affiliations.push(current_affiliation.clone());
                    }
                    in_affiliation = false;
                }
                b"Email" => in_email = false,
                _ => {}
            },
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();

                if in_author {
                    if !current.block_text.is_empty() {
                        current.block_text.push(' ');
                    }
                    current.block_text.push_str(&text);
                }

                if in_last_name && in_author {
                    current.last_name = Some(text);
                } else if in_fore_name && in_author {
                    current.fore_name = Some(text);
                } else if in_collective_name && in_author {
                    current.collective_name = Some(text);
                } else if in_affiliation && in_author {
                    if !current_affiliation.is_empty() {
                        current_affiliation.push(' ');
                    }
                    current_affiliation.push_str(&text);
                } else if in_email && in_author && current.email.is_none() {
                    current.email = Some(text.trim().to_string());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(authors)
}

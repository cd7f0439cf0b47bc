// src/codec.rs

//! Flat-text record codec.
//!
//! Each stored article is one UTF-8 text file of `KEY: value` lines. The
//! field set and order of the encoded form are fixed, but the decoder
//! scans for the separator instead of relying on position, so a record
//! survives reordering and stray lines.
//!
//! Tag lists are comma-joined into a single value. A tag id or title that
//! itself contains a comma is therefore not split back correctly; this is
//! an accepted limitation of the encoding.

use std::collections::HashMap;

use crate::models::Article;

/// Key under which the decoder stores the storage-derived label.
pub const LABEL_KEY: &str = "label";

/// Make an article id safe to use as a file name.
pub fn sanitize_id(id: &str) -> String {
    id.replace('/', "_")
}

fn join_csv<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(",")
}

/// Encode one article into its canonical 14-line record form.
///
/// Absent source data encodes as an empty value; this never fails.
pub fn encode_article(article: &Article) -> String {
    let fields = &article.fields;

    let tag_ids = join_csv(article.tags.iter().map(|t| t.id.as_str()));
    let tag_titles = join_csv(article.tags.iter().map(|t| t.title.as_str()));

    let (primary_id, primary_title, primary_type) = match article.primary_tag() {
        Some(tag) => (tag.id.as_str(), tag.title.as_str(), tag.tag_type.as_str()),
        None => ("", "", ""),
    };

    let lines = [
        format!("ID: {}", article.id),
        format!("SECTION_ID: {}", article.section_id),
        format!("SECTION_NAME: {}", article.section_name),
        format!("WEB_TITLE: {}", article.web_title),
        format!("WEB_URL: {}", article.web_url),
        format!("HEADLINE: {}", fields.headline),
        format!("TRAIL_TEXT: {}", fields.trail_text),
        format!("BYLINE: {}", fields.byline),
        format!("BODY_TEXT: {}", fields.body_text),
        format!("TAGS_IDS: {}", tag_ids),
        format!("TAGS_TITLES: {}", tag_titles),
        format!("PRIMARY_TAG_ID: {}", primary_id),
        format!("PRIMARY_TAG_TITLE: {}", primary_title),
        format!("PRIMARY_TAG_TYPE: {}", primary_type),
    ];

    lines.join("\n")
}

/// Decode a stored record into a field map, tagged with its label.
///
/// Every line containing a `:` is split on the first occurrence into a
/// trimmed key/value pair; lines without one are ignored. A duplicated
/// key keeps its last value. The label is whatever storage grouping the
/// caller read the record from, not the SECTION_NAME inside the text.
pub fn decode_record(text: &str, label: &str) -> HashMap<String, String> {
    let mut record = HashMap::new();
    record.insert(LABEL_KEY.to_string(), label.to_string());

    for line in text.lines() {
        if let Some((key, value)) = line.split_once(':') {
            record.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleFields, Tag};

    fn tagged_article() -> Article {
        Article {
            id: "sport/2026/aug/01/final".to_string(),
            section_id: "sport".to_string(),
            section_name: "Sport".to_string(),
            web_title: "The final".to_string(),
            web_url: "https://example.com/sport/final".to_string(),
            fields: ArticleFields {
                headline: "The final, reviewed".to_string(),
                trail_text: "A short summary".to_string(),
                byline: "A. Reporter".to_string(),
                body_text: "Full text of the article.".to_string(),
            },
            tags: vec![
                Tag {
                    id: "t1".to_string(),
                    title: "T1".to_string(),
                    tag_type: "keyword".to_string(),
                },
                Tag {
                    id: "t2".to_string(),
                    title: "T2".to_string(),
                    tag_type: "keyword".to_string(),
                },
            ],
        }
    }

    #[test]
    fn encode_is_fourteen_fixed_lines() {
        let text = encode_article(&tagged_article());
        let keys: Vec<_> = text
            .lines()
            .map(|l| l.split_once(':').map(|(k, _)| k).unwrap_or(l))
            .collect();
        assert_eq!(
            keys,
            [
                "ID",
                "SECTION_ID",
                "SECTION_NAME",
                "WEB_TITLE",
                "WEB_URL",
                "HEADLINE",
                "TRAIL_TEXT",
                "BYLINE",
                "BODY_TEXT",
                "TAGS_IDS",
                "TAGS_TITLES",
                "PRIMARY_TAG_ID",
                "PRIMARY_TAG_TITLE",
                "PRIMARY_TAG_TYPE",
            ]
        );
    }

    #[test]
    fn tags_join_and_primary_derivation() {
        let text = encode_article(&tagged_article());
        assert!(text.contains("TAGS_IDS: t1,t2"));
        assert!(text.contains("TAGS_TITLES: T1,T2"));
        assert!(text.contains("PRIMARY_TAG_ID: t1"));
        assert!(text.contains("PRIMARY_TAG_TITLE: T1"));
        assert!(text.contains("PRIMARY_TAG_TYPE: keyword"));
    }

    #[test]
    fn no_tags_encode_as_empty_values() {
        let mut article = tagged_article();
        article.tags.clear();

        let record = decode_record(&encode_article(&article), "sport");
        for key in [
            "TAGS_IDS",
            "TAGS_TITLES",
            "PRIMARY_TAG_ID",
            "PRIMARY_TAG_TITLE",
            "PRIMARY_TAG_TYPE",
        ] {
            assert_eq!(record[key], "", "{key} should be empty");
        }
    }

    #[test]
    fn article_without_fields_block_still_encodes() {
        let article: Article =
            serde_json::from_str(r#"{"id": "news/1", "sectionId": "news"}"#).unwrap();

        let record = decode_record(&encode_article(&article), "news");
        assert_eq!(record["ID"], "news/1");
        assert_eq!(record["HEADLINE"], "");
        assert_eq!(record["BODY_TEXT"], "");
    }

    #[test]
    fn round_trip_preserves_field_values() {
        let article = tagged_article();
        let record = decode_record(&encode_article(&article), "sport-label");

        assert_eq!(record["ID"], article.id);
        assert_eq!(record["SECTION_ID"], "sport");
        assert_eq!(record["SECTION_NAME"], "Sport");
        assert_eq!(record["WEB_TITLE"], "The final");
        assert_eq!(record["WEB_URL"], "https://example.com/sport/final");
        assert_eq!(record["HEADLINE"], "The final, reviewed");
        assert_eq!(record["TRAIL_TEXT"], "A short summary");
        assert_eq!(record["BYLINE"], "A. Reporter");
        assert_eq!(record["BODY_TEXT"], "Full text of the article.");
        assert_eq!(record["TAGS_IDS"], "t1,t2");
        assert_eq!(record[LABEL_KEY], "sport-label");
    }

    #[test]
    fn label_comes_from_caller_not_section_name() {
        let record = decode_record("SECTION_NAME: Sport", "opinion");
        assert_eq!(record[LABEL_KEY], "opinion");
        assert_eq!(record["SECTION_NAME"], "Sport");
    }

    #[test]
    fn decode_ignores_lines_without_separator() {
        let record = decode_record("ID: a\njunk line\n\nBYLINE: b", "x");
        assert_eq!(record.len(), 3); // label + 2 parsed
        assert_eq!(record["ID"], "a");
        assert_eq!(record["BYLINE"], "b");
    }

    #[test]
    fn decode_splits_on_first_separator_only() {
        let record = decode_record("WEB_URL: https://example.com/x", "x");
        assert_eq!(record["WEB_URL"], "https://example.com/x");
    }

    #[test]
    fn decode_keeps_last_duplicate_key() {
        let record = decode_record("ID: first\nID: second", "x");
        assert_eq!(record["ID"], "second");
    }

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_id("news/2026/aug/01/x"), "news_2026_aug_01_x");
        assert_eq!(sanitize_id("plain"), "plain");
    }
}

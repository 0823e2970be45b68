use std::collections::BTreeSet;

use article_core::{Article, ArticleId, ArticleRecord};
use serde_json::json;

fn keys(value: &serde_json::Value) -> BTreeSet<String> {
    value
        .as_object()
        .expect("object")
        .keys()
        .cloned()
        .collect()
}

#[test]
fn create_keeps_every_field_of_the_record() {
    let record: ArticleRecord = serde_json::from_value(json!({
        "article_id": 12,
        "author": "Kevin Bacon",
        "authorUrl": "http://kevinbacon.com",
        "body": "*hello*",
        "category": "Engineering",
        "publishedOn": "2015-02-10",
        "title": "Bluetooth off-line program"
    }))
    .unwrap();

    let article = Article::create(record.clone());

    assert_eq!(article.article_id, Some(ArticleId::Number(12)));
    assert_eq!(article.author, record.author);
    assert_eq!(article.author_url, record.author_url);
    assert_eq!(article.body, record.body);
    assert_eq!(article.category, record.category);
    assert_eq!(article.published_on, record.published_on);
    assert_eq!(article.title, record.title);
}

#[test]
fn create_introduces_no_fields_and_drops_unknown_ones() {
    let raw = json!({
        "article_id": "a-1",
        "author_id": 3,
        "title": "Only a title",
        "views": 1000
    });
    let record: ArticleRecord = serde_json::from_value(raw).unwrap();
    let article = Article::from(record);

    let written = serde_json::to_value(&article).unwrap();
    let present: BTreeSet<String> = keys(&written)
        .into_iter()
        .filter(|k| !written[k].is_null())
        .collect();
    assert_eq!(
        present,
        BTreeSet::from(["article_id".to_owned(), "title".to_owned()])
    );
    assert_eq!(article.article_id, Some(ArticleId::Text("a-1".into())));
}

#[test]
fn missing_fields_are_allowed() {
    let record: ArticleRecord = serde_json::from_value(json!({})).unwrap();
    let article = Article::create(record);
    assert_eq!(article, Article::default());
    assert!(article.is_draft());
}

#[test]
fn camel_case_identifier_is_accepted() {
    let record: ArticleRecord = serde_json::from_value(json!({ "articleId": 5 })).unwrap();
    assert_eq!(record.article_id, Some(ArticleId::Number(5)));
    assert_eq!(ArticleId::Number(5).to_string(), "5");
}

#[test]
fn payload_is_the_six_mutable_fields_only() {
    let record: ArticleRecord = serde_json::from_value(json!({
        "article_id": 99,
        "author": "A",
        "authorUrl": "http://a",
        "body": "b",
        "category": "c",
        "publishedOn": "2015-01-01",
        "title": "t",
        "author_id": 7
    }))
    .unwrap();
    let article = Article::create(record);

    let payload = serde_json::to_value(article.payload()).unwrap();
    assert_eq!(
        keys(&payload),
        BTreeSet::from(
            ["author", "authorUrl", "body", "category", "publishedOn", "title"]
                .map(String::from)
        )
    );
    assert_eq!(payload["publishedOn"], "2015-01-01");
}

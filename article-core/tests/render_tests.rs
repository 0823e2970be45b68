use article_core::{Article, ArticleRenderer, StoreError};
use chrono::{DateTime, TimeZone, Utc};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn article(published_on: Option<&str>, body: &str) -> Article {
    Article {
        title: Some("Primary neural matrix".into()),
        author: Some("Sam Elliott".into()),
        category: Some("Science".into()),
        published_on: published_on.map(str::to_owned),
        body: Some(body.into()),
        ..Article::default()
    }
}

#[test]
fn published_ten_days_ago() {
    let a = article(Some("2020-01-01T00:00:00Z"), "text");
    let view = ArticleRenderer::view(&a, at(2020, 1, 11, 0, 0, 0));
    assert_eq!(view.days_ago, Some(10));
    assert_eq!(view.publish_status, "published 10 days ago");

    let html = ArticleRenderer::new()
        .unwrap()
        .render(&a, at(2020, 1, 11, 0, 0, 0))
        .unwrap();
    assert!(html.contains("published 10 days ago"));
    assert!(html.contains("Primary neural matrix"));
}

#[test]
fn partial_days_are_truncated() {
    let a = article(Some("2020-01-01T12:00:00Z"), "");
    let view = ArticleRenderer::view(&a, at(2020, 1, 11, 11, 59, 59));
    assert_eq!(view.days_ago, Some(9));
    assert_eq!(view.publish_status, "published 9 days ago");
}

#[test]
fn date_only_values_count_from_midnight() {
    let a = article(Some("2015-02-10"), "");
    let view = ArticleRenderer::view(&a, at(2015, 2, 20, 8, 0, 0));
    assert_eq!(view.days_ago, Some(10));
}

#[test]
fn empty_or_missing_date_is_a_draft() {
    let renderer = ArticleRenderer::new().unwrap();
    for published_on in [Some(""), None] {
        let a = article(published_on, "draft body");
        let view = ArticleRenderer::view(&a, Utc::now());
        assert_eq!(view.publish_status, "(draft)");
        assert_eq!(view.days_ago, None);

        let html = renderer.render(&a, Utc::now()).unwrap();
        assert!(html.contains("(draft)"));
        assert!(!html.contains("days ago"));
    }
}

#[test]
fn unreadable_date_keeps_the_raw_value() {
    let a = article(Some("someday"), "");
    let view = ArticleRenderer::view(&a, Utc::now());
    assert_eq!(view.days_ago, None);
    assert_eq!(view.publish_status, "published someday");
}

#[test]
fn body_markdown_becomes_html_and_html_passes_through() {
    let a = article(None, "**bold** and <em class=\"x\">kept</em>\n\n~~gone~~");
    let view = ArticleRenderer::view(&a, Utc::now());
    assert!(view.body.contains("<strong>bold</strong>"));
    assert!(view.body.contains("<em class=\"x\">kept</em>"));
    assert!(view.body.contains("<del>gone</del>"));

    let html = ArticleRenderer::new().unwrap().render(&a, Utc::now()).unwrap();
    assert!(html.contains("<strong>bold</strong>"));
}

#[test]
fn rendering_twice_is_identical_and_leaves_the_article_alone() {
    let a = article(Some("2020-01-01"), "# Heading\n\nsome *text*");
    let before = a.clone();
    let renderer = ArticleRenderer::new().unwrap();
    let now = at(2020, 3, 1, 0, 0, 0);

    let first = renderer.render(&a, now).unwrap();
    let second = renderer.render(&a, now).unwrap();

    assert_eq!(first, second);
    assert_eq!(a, before);
}

#[test]
fn custom_templates_see_camel_case_fields() {
    let renderer =
        ArticleRenderer::with_template("{{ title }}|{{ publishStatus }}|{{ daysAgo }}").unwrap();
    let a = article(Some("2020-01-01T00:00:00Z"), "");
    let out = renderer.render(&a, at(2020, 1, 3, 0, 0, 0)).unwrap();
    assert_eq!(out, "Primary neural matrix|published 2 days ago|2");
}

#[test]
fn author_link_only_when_url_present() {
    let renderer = ArticleRenderer::new().unwrap();
    let mut a = article(None, "");
    let html = renderer.render(&a, Utc::now()).unwrap();
    assert!(!html.contains("<a href"));

    a.author_url = Some("samelliott.com".into());
    let html = renderer.render(&a, Utc::now()).unwrap();
    assert!(html.contains("<a href=\"samelliott.com\">Sam Elliott</a>"));
}

#[test]
fn render_all_keeps_order() {
    let renderer = ArticleRenderer::with_template("{{ title }}").unwrap();
    let mut first = article(None, "");
    first.title = Some("one".into());
    let mut second = article(None, "");
    second.title = Some("two".into());

    let out = renderer.render_all(&[first, second], Utc::now()).unwrap();
    assert_eq!(out, vec!["one".to_owned(), "two".to_owned()]);
}

#[test]
fn broken_template_is_a_template_error() {
    let err = ArticleRenderer::with_template("{{ title").unwrap_err();
    assert!(matches!(err, StoreError::Template(_)));
}

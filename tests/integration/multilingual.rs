//! Multilingual (v3) glossaries against the mock server.

use crate::mock_server::MockServerFixture;
use deepl_client::{ErrorKind, GlossaryEntries, MultilingualGlossaryDictionaryEntries};
use mockito::Matcher;

const INFO: &str = r#"{"glossary_id":"G1","name":"Kitchen","creation_time":"2025-03-01T10:00:00Z",
    "dictionaries":[{"source_lang":"en","target_lang":"de","entry_count":2},
                    {"source_lang":"de","target_lang":"en","entry_count":1}]}"#;

fn kitchen_en_de() -> MultilingualGlossaryDictionaryEntries {
    let entries =
        GlossaryEntries::try_from_pairs([("kitchen", "Küche"), ("spoon", "Löffel")]).unwrap();
    MultilingualGlossaryDictionaryEntries::new("EN", "DE", entries)
}

#[tokio::test]
async fn test_create_sends_indexed_dictionaries() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v3/glossaries")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "Kitchen".into()),
            Matcher::UrlEncoded("dictionaries[0].source_lang".into(), "en".into()),
            Matcher::UrlEncoded("dictionaries[0].target_lang".into(), "de".into()),
            Matcher::UrlEncoded(
                "dictionaries[0].entries".into(),
                "kitchen\tKüche\nspoon\tLöffel".into(),
            ),
            Matcher::UrlEncoded("dictionaries[0].entries_format".into(), "tsv".into()),
            Matcher::UrlEncoded("dictionaries[1].source_lang".into(), "de".into()),
            Matcher::UrlEncoded("dictionaries[1].target_lang".into(), "en".into()),
            Matcher::UrlEncoded("dictionaries[1].entries".into(), "Herd\tstove".into()),
        ]))
        .with_status(201)
        .with_body(INFO)
        .create_async()
        .await;

    let de_en = MultilingualGlossaryDictionaryEntries::new(
        "de",
        "en",
        GlossaryEntries::try_from_pairs([("Herd", "stove")]).unwrap(),
    );
    let info = fixture
        .translator()
        .create_multilingual_glossary("Kitchen", &[kitchen_en_de(), de_en])
        .await
        .unwrap();

    assert_eq!(info.glossary_id, "G1");
    assert_eq!(info.dictionary("de", "en").map(|d| d.entry_count), Some(1));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_requests_are_rejected_locally() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v3/glossaries")
        .expect(0)
        .create_async()
        .await;
    let translator = fixture.translator();

    let err = translator
        .create_multilingual_glossary("", &[kitchen_en_de()])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = translator
        .create_multilingual_glossary("Kitchen", &[])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let empty = MultilingualGlossaryDictionaryEntries::new("en", "de", GlossaryEntries::new());
    let err = translator
        .create_multilingual_glossary("Kitchen", &[empty])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = translator
        .multilingual_glossary_entries("G1", "", "de")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = translator.multilingual_glossary("").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_entries_for_one_language_pair() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", "/v3/glossaries/G1/entries")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("source_lang".into(), "en".into()),
            Matcher::UrlEncoded("target_lang".into(), "de".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"dictionaries":[{"source_lang":"en","target_lang":"de",
                "entries":"kitchen\tKüche\nspoon\tLöffel","entries_format":"tsv"}]}"#,
        )
        .create_async()
        .await;

    let dict = fixture
        .translator()
        .multilingual_glossary_entries("G1", "EN", "de")
        .await
        .unwrap();

    assert_eq!(dict.entries, kitchen_en_de().entries);
    assert_eq!(dict.source_lang, "en");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_dictionary_is_glossary_not_found() {
    let mut fixture = MockServerFixture::new().await;
    fixture
        .server
        .mock("GET", "/v3/glossaries/G1/entries")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"dictionaries":[]}"#)
        .create_async()
        .await;
    fixture
        .mock_json("GET", "/v3/glossaries/nope", 404, r#"{"message":"Glossary not found"}"#)
        .await;

    let translator = fixture.translator();
    let err = translator
        .multilingual_glossary_entries("G1", "en", "fr")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GlossaryNotFound);
    let err = translator.multilingual_glossary("nope").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GlossaryNotFound);
}

#[tokio::test]
async fn test_replace_update_rename() {
    let mut fixture = MockServerFixture::new().await;
    let replace = fixture
        .server
        .mock("PUT", "/v3/glossaries/G1/dictionaries")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("source_lang".into(), "en".into()),
            Matcher::UrlEncoded("target_lang".into(), "de".into()),
            Matcher::UrlEncoded("entries".into(), "kitchen\tKüche\nspoon\tLöffel".into()),
            Matcher::UrlEncoded("entries_format".into(), "tsv".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"source_lang":"en","target_lang":"de","entry_count":2}"#)
        .create_async()
        .await;
    let update = fixture
        .server
        .mock("PATCH", "/v3/glossaries/G1")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("dictionaries[0].source_lang".into(), "en".into()),
            Matcher::UrlEncoded("dictionaries[0].entries".into(), "fork,Gabel".into()),
            Matcher::UrlEncoded("dictionaries[0].entries_format".into(), "csv".into()),
        ]))
        .with_status(200)
        .with_body(INFO)
        .create_async()
        .await;
    let rename = fixture
        .server
        .mock("PATCH", "/v3/glossaries/G1")
        .match_body(Matcher::UrlEncoded("name".into(), "Kitchen v2".into()))
        .with_status(200)
        .with_body(INFO)
        .create_async()
        .await;

    let translator = fixture.translator();
    let dict = translator
        .replace_multilingual_glossary_dictionary("G1", &kitchen_en_de())
        .await
        .unwrap();
    assert_eq!(dict.entry_count, 2);

    translator
        .update_multilingual_glossary_dictionary_from_csv("G1", "en", "de", "fork,Gabel")
        .await
        .unwrap();
    translator
        .update_multilingual_glossary_name("G1", "Kitchen v2")
        .await
        .unwrap();

    replace.assert_async().await;
    update.assert_async().await;
    rename.assert_async().await;
}

#[tokio::test]
async fn test_delete_dictionary_and_glossary() {
    let mut fixture = MockServerFixture::new().await;
    let dictionary = fixture
        .server
        .mock("DELETE", "/v3/glossaries/G1/dictionaries")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("source_lang".into(), "de".into()),
            Matcher::UrlEncoded("target_lang".into(), "en".into()),
        ]))
        .with_status(204)
        .create_async()
        .await;
    let glossary = fixture
        .server
        .mock("DELETE", "/v3/glossaries/G1")
        .with_status(204)
        .create_async()
        .await;

    let translator = fixture.translator();
    translator
        .delete_multilingual_glossary_dictionary("G1", "de", "en")
        .await
        .unwrap();
    translator.delete_multilingual_glossary("G1").await.unwrap();

    dictionary.assert_async().await;
    glossary.assert_async().await;
}

#[tokio::test]
async fn test_list() {
    let mut fixture = MockServerFixture::new().await;
    fixture
        .mock_json("GET", "/v3/glossaries", 200, &format!(r#"{{"glossaries":[{}]}}"#, INFO))
        .await;

    let glossaries = fixture.translator().list_multilingual_glossaries().await.unwrap();
    assert_eq!(glossaries.len(), 1);
    assert_eq!(glossaries[0].dictionaries.len(), 2);
}

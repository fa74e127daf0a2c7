//! Catalog endpoints against a real database

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use crate::common::{admin_token, app, get, pluck, send};

// Authors

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_list_authors(pool: PgPool) {
    let (app, _) = app(pool);

    let (status, body) = get(&app, "/authors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"authors": [
            {"id": 1, "shortName": "Mendax", "fullName": "Publius Flavius Mendax"},
            {"id": 2, "shortName": "Pullo", "fullName": "Titus Pullo"},
            {"id": 3, "shortName": "Tully", "fullName": "Marcus Tullius Cicero"},
        ]})
    );

    let (_, body) = get(&app, "/authors?shortName=ULL").await;
    assert_eq!(pluck(&body["authors"], "shortName"), vec!["Pullo", "Tully"]);

    let (_, body) = get(&app, "/authors?shortName=nope").await;
    assert_eq!(body, json!({"authors": []}));
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_like_wildcards_match_literally(pool: PgPool) {
    let (app, _) = app(pool);
    let (_, body) = get(&app, "/authors?shortName=%25").await;
    assert_eq!(body, json!({"authors": []}));
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_get_author_with_works(pool: PgPool) {
    let (app, _) = app(pool);

    let (status, body) = get(&app, "/authors/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["shortName"], "Mendax");
    assert_eq!(
        pluck(&body["author"]["works"], "shortTitle"),
        vec!["Primum", "Secundum"]
    );

    let (_, body) = get(&app, "/authors/3").await;
    assert_eq!(body["author"]["works"], json!([]));

    let (status, body) = get(&app, "/authors/-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No author with id: -1");
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_create_author(pool: PgPool) {
    let (app, _) = app(pool);
    let admin = admin_token();
    let new_author = json!({"shortName": "Vergil", "fullName": "Publius Vergilius Maro"});

    let (status, body) =
        send(&app, Method::POST, "/authors", Some(&admin), Some(new_author.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"author": {"id": 4, "shortName": "Vergil", "fullName": "Publius Vergilius Maro"}})
    );

    let (status, body) = get(&app, "/authors/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["fullName"], "Publius Vergilius Maro");

    let (status, body) =
        send(&app, Method::POST, "/authors", Some(&admin), Some(new_author)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Duplicate author: Vergil");
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_update_author(pool: PgPool) {
    let (app, _) = app(pool);
    let admin = admin_token();

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/authors/2",
        Some(&admin),
        Some(json!({"fullName": "Titus Pullo Centurio"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"author": {"id": 2, "shortName": "Pullo", "fullName": "Titus Pullo Centurio"}})
    );

    // renaming onto another author's short name
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/authors/2",
        Some(&admin),
        Some(json!({"shortName": "Tully"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // keeping one's own short name is not a duplicate
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/authors/2",
        Some(&admin),
        Some(json!({"shortName": "Pullo"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/authors/0",
        Some(&admin),
        Some(json!({"fullName": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    // a missing author is reported before the short name is checked
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/authors/99",
        Some(&admin),
        Some(json!({"shortName": "Tully"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No author with id: 99");
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_delete_author_cascades(pool: PgPool) {
    let (app, _) = app(pool);
    let admin = admin_token();

    let (status, body) = send(&app, Method::DELETE, "/authors/1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": "1"}));

    let (status, _) = get(&app, "/authors/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/works/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, "/lines").await;
    assert_eq!(body, json!({"lines": []}));

    let (status, _) = send(&app, Method::DELETE, "/authors/1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// Works

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_list_works(pool: PgPool) {
    let (app, _) = app(pool);

    let (status, body) = get(&app, "/works").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        pluck(&body["works"], "shortTitle"),
        vec!["Primum", "Secundum", "Tertium"]
    );
    assert_eq!(
        body["works"][2],
        json!({
            "id": 3,
            "shortTitle": "Tertium",
            "fullTitle": "Opus Tertium De Otio",
            "langCode": "LAT",
            "authorId": 2
        })
    );

    let (_, body) = get(&app, "/works?authorId=1&fullTitle=corpore").await;
    assert_eq!(pluck(&body["works"], "id"), vec![2]);

    let (_, body) = get(&app, "/works?langCode=la").await;
    assert_eq!(pluck(&body["works"], "id"), vec![1, 2, 3]);

    let (_, body) = get(&app, "/works?authorId=3").await;
    assert_eq!(body, json!({"works": []}));
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_get_work_with_filtered_lines(pool: PgPool) {
    let (app, _) = app(pool);

    let (status, body) = get(&app, "/works/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["work"]["shortTitle"], "Secundum");
    assert_eq!(pluck(&body["work"]["lines"], "id"), vec![4, 5, 6]);
    assert_eq!(body["work"]["lines"][0]["scanPattern"], "SSDS");

    let (_, body) = get(&app, "/works/2?maxLineNum=2").await;
    assert_eq!(pluck(&body["work"]["lines"], "lineNum"), vec![1, 2]);

    let (_, body) = get(&app, "/works/2?scanPattern=DDSS").await;
    assert_eq!(pluck(&body["work"]["lines"], "id"), vec![5]);

    let (_, body) = get(&app, "/works/3").await;
    assert_eq!(body["work"]["lines"], json!([]));

    let (status, _) = get(&app, "/works/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_create_work(pool: PgPool) {
    let (app, _) = app(pool);
    let admin = admin_token();
    let new_work = json!({
        "shortTitle": "Primum",
        "fullTitle": "Opus Primum Pullonis",
        "langCode": "LAT",
        "authorId": 2
    });

    let (status, body) =
        send(&app, Method::POST, "/works", Some(&admin), Some(new_work.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["work"]["id"], 4);
    assert_eq!(body["work"]["authorId"], 2);

    let (status, body) = send(&app, Method::POST, "/works", Some(&admin), Some(new_work)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Duplicate work: Primum");

    // unknown language and author are bad references, not server errors
    let (status, _) = send(
        &app,
        Method::POST,
        "/works",
        Some(&admin),
        Some(json!({"shortTitle": "X", "fullTitle": "X", "langCode": "XXX", "authorId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/works",
        Some(&admin),
        Some(json!({"shortTitle": "X", "fullTitle": "X", "langCode": "LAT", "authorId": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_update_and_delete_work(pool: PgPool) {
    let (app, _) = app(pool);
    let admin = admin_token();

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/works/3",
        Some(&admin),
        Some(json!({"fullTitle": "Opus Tertium De Negotio"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["work"]["fullTitle"], "Opus Tertium De Negotio");

    // Mendax already has a Primum
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/works/3",
        Some(&admin),
        Some(json!({"shortTitle": "Primum", "authorId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::DELETE, "/works/1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": "1"}));

    let (_, body) = get(&app, "/lines?workId=1").await;
    assert_eq!(body, json!({"lines": []}));

    let (status, _) = send(&app, Method::DELETE, "/works/1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// Lines

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_list_lines_ordering(pool: PgPool) {
    let (app, _) = app(pool);

    let (status, body) = get(&app, "/lines").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pluck(&body["lines"], "id"), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(
        body["lines"][0],
        json!({
            "id": 1,
            "lineNum": 1,
            "lineText": "Qui fit, Maecenas, ut nemo, quam sibi sortem",
            "scanPattern": "SSSS",
            "fifthFootSpondee": false,
            "bookNum": 1,
            "workId": 1
        })
    );
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_line_single_filters(pool: PgPool) {
    let (app, _) = app(pool);

    let cases: &[(&str, &[i32])] = &[
        ("scanPattern=SSSS", &[1, 3]),
        ("scanPattern=sd", &[4]),
        ("minLineNum=3", &[3, 6]),
        ("maxLineNum=1", &[1, 4]),
        ("lineText=LAUD", &[3, 5]),
        ("fifthFootSpondee=false", &[1, 2, 3, 4, 5, 6]),
        ("fifthFootSpondee=true", &[]),
        ("minBookNum=2", &[4, 5, 6]),
        ("maxBookNum=1", &[1, 2, 3]),
        ("workId=2", &[4, 5, 6]),
        ("workId=3", &[]),
    ];

    for (filter, expected) in cases {
        let (status, body) = get(&app, &format!("/lines?{}", filter)).await;
        assert_eq!(status, StatusCode::OK, "{}", filter);
        assert_eq!(pluck(&body["lines"], "id"), expected.to_vec(), "{}", filter);
    }
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_line_filters_intersect(pool: PgPool) {
    let (app, _) = app(pool);

    let (_, body) = get(&app, "/lines?scanPattern=DDSS&minLineNum=2&maxLineNum=2&workId=2").await;
    assert_eq!(pluck(&body["lines"], "id"), vec![5]);

    let (_, body) = get(&app, "/lines?minLineNum=2&maxLineNum=2").await;
    assert_eq!(pluck(&body["lines"], "id"), vec![2, 5]);

    let (_, body) = get(&app, "/lines?lineText=qu&maxBookNum=1").await;
    assert_eq!(pluck(&body["lines"], "id"), vec![1, 3]);
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_get_line(pool: PgPool) {
    let (app, _) = app(pool);

    let (status, body) = get(&app, "/lines/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["line"]["scanPattern"], "DDSS");
    assert!(body["line"].get("scanPatternId").is_none());

    let (status, body) = get(&app, "/lines/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No line with id: 0");
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_create_line(pool: PgPool) {
    let (app, _) = app(pool);
    let admin = admin_token();
    let new_line = json!({
        "lineNum": 147,
        "lineText": "Nox erat et terris animalia somnus habebat;",
        "scanPatternId": 5,
        "fifthFootSpondee": false,
        "bookNum": 3,
        "workId": 3
    });

    let (status, body) =
        send(&app, Method::POST, "/lines", Some(&admin), Some(new_line.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"line": {
            "id": 7,
            "lineNum": 147,
            "lineText": "Nox erat et terris animalia somnus habebat;",
            "scanPatternId": 5,
            "fifthFootSpondee": false,
            "bookNum": 3,
            "workId": 3
        }})
    );

    let (_, body) = get(&app, "/lines/7").await;
    assert_eq!(body["line"]["scanPattern"], "DSDD");

    let (status, _) = send(&app, Method::POST, "/lines", Some(&admin), Some(new_line)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // no such scansion pattern
    let (status, _) = send(
        &app,
        Method::POST,
        "/lines",
        Some(&admin),
        Some(json!({"lineNum": 1, "lineText": "x", "scanPatternId": 17, "bookNum": 1, "workId": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(fixtures("catalog"))]
#[ignore]
async fn test_update_and_delete_line(pool: PgPool) {
    let (app, _) = app(pool);
    let admin = admin_token();

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/lines/6",
        Some(&admin),
        Some(json!({"fifthFootSpondee": true, "scanPatternId": 16})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["line"]["scanPatternId"], 16);
    assert_eq!(body["line"]["fifthFootSpondee"], true);

    let (_, body) = get(&app, "/lines?fifthFootSpondee=true").await;
    assert_eq!(pluck(&body["lines"], "id"), vec![6]);

    // line 5 renumbered onto line 4's number and text
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/lines/5",
        Some(&admin),
        Some(json!({"lineNum": 1, "lineText": "Quamvis digressu veteris confusus amici"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/lines/99",
        Some(&admin),
        Some(json!({"bookNum": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/lines/6", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": "6"}));

    let (status, _) = get(&app, "/lines/6").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// Reference tables

#[sqlx::test]
#[ignore]
async fn test_reference_tables(pool: PgPool) {
    let (app, _) = app(pool);

    let (status, body) = get(&app, "/languages").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"languages": [
            {"langCode": "GRC", "name": "Ancient Greek"},
            {"langCode": "LAT", "name": "Latin"},
        ]})
    );

    let (status, body) = get(&app, "/scan-patterns").await;
    assert_eq!(status, StatusCode::OK);
    let patterns = pluck(&body["scanPatterns"], "pattern");
    assert_eq!(patterns.len(), 16);
    assert_eq!(patterns[0], "DDDD");
    assert_eq!(patterns[3], "DDSS");
    assert_eq!(patterns[15], "SSSS");
}

//! Classification grid for `ResourceType::classify`.
//!
//! Each `#[case]` is isolated — no shared state.

use resdeploy_core::types::ResourceType;
use rstest::rstest;

#[rstest]
#[case("login.js", ResourceType::Js)]
#[case("login.JS", ResourceType::Js)]
#[case("site.css", ResourceType::Css)]
#[case("site.CSS", ResourceType::Css)]
#[case("page.html", ResourceType::Html)]
#[case("page.HTML", ResourceType::Html)]
#[case("page.htm", ResourceType::Html)]
#[case("image.png", ResourceType::Html)]
#[case("noextension", ResourceType::Html)]
#[case("", ResourceType::Html)]
#[case("archive.tar.gz", ResourceType::Html)]
#[case("minified.min.js", ResourceType::Js)]
#[case("js/nested/login.js", ResourceType::Js)]
#[case("dir.v2/plain", ResourceType::Html)]
fn classify_is_total_and_case_insensitive(#[case] name: &str, #[case] expected: ResourceType) {
    assert_eq!(ResourceType::classify(name), expected, "file name: {name:?}");
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
use pyo3::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod error;
mod parser;
pub mod render;
mod token;
mod tokenizer;
mod types;

pub use error::{DirectiveProblem, Error, ParseError};
pub use parser::{parse, ParserState};
pub use render::{Format, Render, RenderOptions};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};
pub use types::{Block, ChordedLyric, Comment, CommentStyle, Document, Head, Line, Row};

/// Tokenizes and parses one song.
pub fn parse_str(text: &str) -> Result<Document, ParseError> {
    parse(tokenize(text))
}

pub fn render_str(text: &str, format: Format, options: &RenderOptions) -> Result<String, Error> {
    let doc = parse_str(text)?;
    Ok(format.render(&doc, options)?)
}

pub fn parse_to_json(text: &str) -> Result<String, Error> {
    render_str(text, Format::Json, &RenderOptions::default())
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
fn to_py_err(err: Error) -> PyErr {
    match &err {
        Error::Parse(e) if e.is_unsupported() => {
            pyo3::exceptions::PyNotImplementedError::new_err(err.to_string())
        }
        _ => pyo3::exceptions::PyValueError::new_err(err.to_string()),
    }
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pyfunction]
fn parse_text(text: String) -> PyResult<String> {
    parse_to_json(&text).map_err(to_py_err)
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pyfunction]
#[pyo3(signature = (text, format = "text"))]
fn render_text(text: String, format: &str) -> PyResult<String> {
    let format = Format::from_name(format).map_err(to_py_err)?;
    render_str(&text, format, &RenderOptions::default()).map_err(to_py_err)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn parse_text_wasm(text: &str) -> Result<String, JsValue> {
    parse_to_json(text).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn render_text_wasm(text: &str, format: &str) -> Result<String, JsValue> {
    let format = Format::from_name(format).map_err(|e| JsValue::from_str(&e.to_string()))?;
    render_str(text, format, &RenderOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pymodule]
fn chordpro_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_text, m)?)?;
    m.add_function(wrap_pyfunction!(render_text, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn fixtures_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    fn run_fixture(name: &str, render_text: bool) {
        let input_path = fixtures_dir().join(name);
        let golden_path = fixtures_dir().join(format!("{}.golden.json", name));
        let input = fs::read_to_string(&input_path).expect("Failed to read input");
        let golden = fs::read_to_string(golden_path).expect("Failed to read golden");

        let doc = parse_str(&input).unwrap_or_else(|e| panic!("{}: {}", name, e));

        let v_out = serde_json::to_value(&doc).unwrap();
        let v_golden: serde_json::Value = serde_json::from_str(&golden).unwrap();

        if v_out != v_golden {
            let body_out = v_out["body"].as_array().unwrap();
            let body_golden = v_golden["body"].as_array().unwrap();

            if body_out.len() == body_golden.len() {
                for (i, (a, b)) in body_out.iter().zip(body_golden.iter()).enumerate() {
                    if a != b {
                        println!("Mismatch at body index {}", i);
                        println!("Got: {}", serde_json::to_string_pretty(a).unwrap());
                        println!("Exp: {}", serde_json::to_string_pretty(b).unwrap());
                        break;
                    }
                }
            }

            assert_eq!(v_out, v_golden, "Mismatch in fixture {}", name);
        }

        let back: Document = serde_json::from_value(v_golden).unwrap();
        assert_eq!(back, doc);

        if render_text {
            let golden_text =
                fs::read_to_string(fixtures_dir().join(format!("{}.golden.txt", name)))
                    .expect("Failed to read text golden");
            let text = Format::Text
                .render(&doc, &RenderOptions::default())
                .unwrap();
            assert_eq!(text, golden_text, "Text mismatch in fixture {}", name);
        }
    }

    #[test]
    fn test_fixtures() {
        let fixtures_text = fs::read_to_string(fixtures_dir().join("fixtures.json"))
            .expect("Failed to read fixtures.json");
        let fixtures: serde_json::Value =
            serde_json::from_str(&fixtures_text).expect("Invalid fixtures.json");
        let obj = fixtures
            .as_object()
            .expect("fixtures.json must be an object");

        for (name, cfg) in obj {
            let render_text = cfg.get("text").and_then(|v| v.as_bool()).unwrap_or(false);
            run_fixture(name, render_text);
        }
    }

    #[test]
    fn test_parse_to_json() {
        let json = parse_to_json("{title: Test}\n[C]Hello [G]world\n\n[Am]Goodbye").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["head"]["title"], "Test");
        assert_eq!(value["body"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["body"][0]["lines"][0]["cells"][0]["lyric"], "Hello ");
    }

    #[test]
    fn test_render_str_reports_parse_errors() {
        let err = render_str("{foo}", Format::Html, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(ref e) if e.is_unsupported()));
        assert_eq!(err.to_string(), "Unimplemented directive foo at line 1");
    }
}

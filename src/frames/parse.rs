use std::fs;
use std::path::Path;

use super::{Code, LabelArray, UNREADABLE_CODE};
use crate::error::{RenderError, RenderResult};

const COMMENT: char = '#';

pub fn read_labels(path: &Path, delimiter: char) -> RenderResult<LabelArray> {
    if !path.exists() {
        return Err(RenderError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(RenderError::InputType(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    let text = fs::read_to_string(path).map_err(|err| RenderError::io(path, err))?;
    parse_labels(&text, delimiter, path)
}

/// Parses delimited text into a [`LabelArray`]. `origin` only labels errors.
pub fn parse_labels(text: &str, delimiter: char, origin: &Path) -> RenderResult<LabelArray> {
    let mut rows: Vec<Vec<Code>> = Vec::new();
    let mut width = None;

    for (line_no, line) in text.lines().enumerate() {
        let content = line.split(COMMENT).next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let row: Vec<Code> = content.split(delimiter).map(parse_code).collect();
        match width {
            None => width = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(RenderError::Parse {
                    path: origin.to_path_buf(),
                    message: format!(
                        "line {} has {} columns instead of {expected}",
                        line_no + 1,
                        row.len()
                    ),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(RenderError::Parse {
            path: origin.to_path_buf(),
            message: "no data rows".into(),
        });
    }

    LabelArray::from_rows(rows).map_err(|err| RenderError::Parse {
        path: origin.to_path_buf(),
        message: err.to_string(),
    })
}

fn parse_code(field: &str) -> Code {
    match field.trim().parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= Code::MIN as f64
                && value <= Code::MAX as f64 =>
        {
            value as Code
        }
        _ => UNREADABLE_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn origin() -> &'static Path {
        Path::new("img_0000.csv")
    }

    #[test]
    fn parses_float_formatted_grid() {
        let text = "0.000000000000000000e+00,1.0,2\n2,1,0\n";
        let labels = parse_labels(text, ',', origin()).unwrap();
        assert_eq!(labels, LabelArray::Grid(arr2(&[[0, 1, 2], [2, 1, 0]])));
    }

    #[test]
    fn non_integral_fields_become_unreadable() {
        let labels = parse_labels("1.5,,nan,x\n", ',', origin()).unwrap();
        assert_eq!(labels, LabelArray::Line(arr1(&[UNREADABLE_CODE; 4])));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# header\n\n1 # trailing\n";
        assert_eq!(
            parse_labels(text, ',', origin()).unwrap(),
            LabelArray::Scalar(1)
        );
    }

    #[test]
    fn ragged_lines_report_the_line_number() {
        let err = parse_labels("0,1\n0,1\n0\n", ',', origin()).unwrap_err();
        match err {
            RenderError::Parse { message, .. } => assert!(message.contains("line 3")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_text_is_a_parse_error() {
        let err = parse_labels("\n  \n", ',', origin()).unwrap_err();
        assert!(matches!(err, RenderError::Parse { .. }));
    }

    #[test]
    fn custom_delimiter() {
        let labels = parse_labels("0;1\n1;0\n", ';', origin()).unwrap();
        assert_eq!(labels, LabelArray::Grid(arr2(&[[0, 1], [1, 0]])));
    }
}

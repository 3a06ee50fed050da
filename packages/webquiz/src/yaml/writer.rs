//! YAML writer for quiz documents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::QuizDocument;

/// Header written above the serialized document.
const YAML_HEADER: &str = "# Quiz model generated by webquiz\n";

/// Generate the YAML representation of a quiz document.
///
/// # Errors
/// Returns `YamlSerialization` if serialization fails.
pub fn generate_yaml(document: &QuizDocument) -> Result<String> {
    let body = serde_yaml_ng::to_string(document)?;
    Ok(format!("{YAML_HEADER}{body}"))
}

/// Path of the YAML file for a quiz source file.
///
/// The file is named after the source with a `.yaml` extension and placed in
/// `output_dir`, or next to the source when no directory is given.
#[must_use]
pub fn output_path(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = source
        .file_stem()
        .map(|stem| format!("{}.yaml", stem.to_string_lossy()))
        .unwrap_or_else(|| "quiz.yaml".to_string());

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => source.with_file_name(file_name),
    }
}

/// Write the YAML for a quiz document and return the path written.
///
/// # Errors
/// Returns `YamlSerialization` or `Io` on failure.
pub fn save_yaml(
    document: &QuizDocument,
    source: &Path,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let path = output_path(source, output_dir);
    let yaml = generate_yaml(document)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&path, yaml)?;
    tracing::debug!(path = %path.display(), "Wrote quiz YAML");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Defaults;
    use crate::types::{Choice, ChoiceKind, Item, Question, QuestionKind};

    #[test]
    fn test_generate_yaml() {
        let mut document = QuizDocument::new(&Defaults::builtin());
        document.title = "Limits".to_string();

        let mut choice = Choice::new(ChoiceKind::Single, 1);
        choice.items.push(Item {
            correct: true,
            text: "0".to_string(),
            ..Item::default()
        });
        choice.correct = 1;
        document.questions.push(Question {
            text: "lim 1/n".to_string(),
            kind: Some(QuestionKind::Choice(choice)),
            ..Question::default()
        });

        let yaml = generate_yaml(&document).unwrap();
        assert!(yaml.starts_with(YAML_HEADER));
        assert!(yaml.contains("title: Limits"));
        assert!(yaml.contains("type: choice"));
        assert!(yaml.contains("kind: single"));
        assert!(yaml.contains("needs_mathjs: false"));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("quizzes/limits.xml"), None),
            PathBuf::from("quizzes/limits.yaml")
        );
        assert_eq!(
            output_path(Path::new("quizzes/limits.xml"), Some(Path::new("out"))),
            PathBuf::from("out/limits.yaml")
        );
    }
}

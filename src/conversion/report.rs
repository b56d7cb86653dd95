//! Per-split conversion report.
//!
//! Records what a COCO → YOLO run produced and anything worth a second
//! look: boxes outside their image, images missing on disk, categories
//! merged by name.

use serde::Serialize;
use std::fmt;

/// A report generated while converting one COCO document.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    pub counts: ConversionCounts,
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Warning)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Info)
            .count()
    }

    /// Number of issues carrying `code`.
    pub fn count_of(&self, code: ConversionIssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} images, {} categories ({} classes), {} annotations",
            self.counts.images, self.counts.categories, self.counts.classes, self.counts.annotations
        )?;
        writeln!(
            f,
            "  wrote {} label rows to {} label files",
            self.counts.label_rows, self.counts.label_files
        )?;

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f, "  Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Warning)
            {
                writeln!(f, "    - {}", issue.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f, "  Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Info)
            {
                writeln!(f, "    - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Input sizes and output produced by one conversion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionCounts {
    pub images: usize,
    pub categories: usize,
    /// Distinct category names.
    pub classes: usize,
    pub annotations: usize,
    pub label_files: usize,
    pub label_rows: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    pub message: String,
}

impl ConversionIssue {
    /// A row was written but deserves attention.
    pub fn warning(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// A note about how the input was interpreted.
    pub fn info(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    Warning,
    Info,
}

/// Stable issue codes. Part of the JSON summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// A box extends past its image; its normalized values leave [0, 1].
    #[serde(rename = "bbox_out_of_bounds")]
    BBoxOutOfBounds,
    /// An annotated image is not present in the images directory.
    MissingImageFile,
    /// Several category ids share a name and therefore one class index.
    SharedCategoryName,
    /// Images without annotations get no label file.
    ImagesWithoutAnnotations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_has_no_issues() {
        let report = ConversionReport::new();
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.info_count(), 0);
    }

    #[test]
    fn issues_are_counted_by_severity_and_code() {
        let mut report = ConversionReport::new();
        report.add(ConversionIssue::warning(
            ConversionIssueCode::BBoxOutOfBounds,
            "annotation #3 leaves image 1",
        ));
        report.add(ConversionIssue::warning(
            ConversionIssueCode::BBoxOutOfBounds,
            "annotation #4 leaves image 1",
        ));
        report.add(ConversionIssue::info(
            ConversionIssueCode::SharedCategoryName,
            "categories 1, 2 share the name 'rice'",
        ));

        assert_eq!(report.warning_count(), 2);
        assert_eq!(report.info_count(), 1);
        assert_eq!(report.count_of(ConversionIssueCode::BBoxOutOfBounds), 2);
        assert_eq!(report.count_of(ConversionIssueCode::MissingImageFile), 0);
    }

    #[test]
    fn display_lists_counts_and_warnings() {
        let mut report = ConversionReport::new();
        report.counts = ConversionCounts {
            images: 2,
            categories: 3,
            classes: 2,
            annotations: 5,
            label_files: 2,
            label_rows: 5,
        };
        report.add(ConversionIssue::warning(
            ConversionIssueCode::MissingImageFile,
            "image 'a.jpg' not found",
        ));

        let text = report.to_string();
        assert!(text.contains("2 images, 3 categories (2 classes), 5 annotations"));
        assert!(text.contains("wrote 5 label rows to 2 label files"));
        assert!(text.contains("Warnings (1):"));
        assert!(text.contains("image 'a.jpg' not found"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = ConversionReport::new();
        report.add(ConversionIssue::warning(
            ConversionIssueCode::BBoxOutOfBounds,
            "box leaves image",
        ));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"code\":\"bbox_out_of_bounds\""));
    }
}

use crate::core::adder;
use crate::core::{
    AddCase, BatchResult, BatchSummary, CaseOutcome, ConfigProvider, Outcome, Pipeline, Storage,
};
use crate::utils::error::{Result, SumError};
use chrono::Utc;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub struct CasePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CasePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CasePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<AddCase>> {
        tracing::debug!("Reading case file: {}", self.config.cases_path());
        let raw = self.storage.read_file(self.config.cases_path()).await?;
        let json: serde_json::Value = serde_json::from_slice(&raw)?;

        // accept a top-level array, or an object carrying a "cases" field
        let cases: Vec<AddCase> = match json {
            serde_json::Value::Array(_) => serde_json::from_value(json)?,
            serde_json::Value::Object(mut map) => match map.remove("cases") {
                Some(list) => serde_json::from_value(list)?,
                None => {
                    return Err(SumError::ProcessingError {
                        message: "case file object has no 'cases' field".to_string(),
                    })
                }
            },
            _ => {
                return Err(SumError::ProcessingError {
                    message: "case file must be a JSON array or an object with a 'cases' field"
                        .to_string(),
                })
            }
        };

        tracing::debug!("Parsed {} cases", cases.len());
        Ok(cases)
    }

    async fn transform(&self, cases: Vec<AddCase>) -> Result<BatchResult> {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(cases.len());
        let mut rejected = Vec::new();
        let (mut summed, mut absent, mut invalid) = (0usize, 0usize, 0usize);

        for case in cases {
            // a rejected case stays in the batch as an Invalid outcome; only
            // infrastructure failures abort the run
            let outcome = match adder::add(case.left.as_deref(), case.right.as_deref()) {
                Ok(Some(digits)) => {
                    summed += 1;
                    Outcome::Sum { digits }
                }
                Ok(None) => {
                    absent += 1;
                    Outcome::Absent
                }
                Err(err @ SumError::InvalidDigit { .. }) => {
                    invalid += 1;
                    tracing::debug!("Case rejected: {}", err);
                    Outcome::Invalid {
                        reason: err.to_string(),
                    }
                }
                Err(err) => return Err(err),
            };

            let case_outcome = CaseOutcome { case, outcome };
            if matches!(case_outcome.outcome, Outcome::Invalid { .. }) {
                rejected.push(case_outcome.clone());
            }
            outcomes.push(case_outcome);
        }

        let csv_output = render_csv_report(&outcomes)?;
        let summary = BatchSummary {
            total: outcomes.len(),
            summed,
            absent,
            invalid,
            started_at,
            finished_at: Utc::now(),
        };

        Ok(BatchResult {
            outcomes,
            csv_output,
            rejected,
            summary,
        })
    }

    async fn load(&self, result: BatchResult) -> Result<String> {
        let output_path = format!("{}/addition_results.zip", self.config.output_path());

        tracing::debug!(
            "Creating ZIP file with {} files",
            2 + if result.rejected.is_empty() { 0 } else { 1 }
        );

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("report.csv", FileOptions::default())?;
            zip.write_all(result.csv_output.as_bytes())?;

            zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
            let summary_json = serde_json::to_string_pretty(&result.summary)?;
            zip.write_all(summary_json.as_bytes())?;

            if !result.rejected.is_empty() {
                zip.start_file::<_, ()>("rejected.json", FileOptions::default())?;
                let rejected_json = serde_json::to_string_pretty(&result.rejected)?;
                zip.write_all(rejected_json.as_bytes())?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage
            .write_file("addition_results.zip", &zip_data)
            .await?;

        Ok(output_path)
    }
}

fn render_csv_report(outcomes: &[CaseOutcome]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["label", "left", "right", "status", "result"])?;

    for entry in outcomes {
        let (status, result) = match &entry.outcome {
            Outcome::Sum { digits } => ("sum", render_digits(digits)),
            Outcome::Absent => ("absent", String::new()),
            Outcome::Invalid { reason } => ("invalid", reason.clone()),
        };
        writer.write_record([
            entry.case.label.clone().unwrap_or_default(),
            entry
                .case
                .left
                .as_deref()
                .map(render_digits)
                .unwrap_or_default(),
            entry
                .case
                .right
                .as_deref()
                .map(render_digits)
                .unwrap_or_default(),
            status.to_string(),
            result,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| SumError::ProcessingError {
            message: format!("CSV buffer error: {}", err),
        })?;
    String::from_utf8(bytes).map_err(|err| SumError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", err),
    })
}

fn render_digits(digits: &[i32]) -> String {
    digits.iter().map(|d| d.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                SumError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        cases_path: String,
        output_path: String,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                cases_path: "cases.json".to_string(),
                output_path: "test_output".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn cases_path(&self) -> &str {
            &self.cases_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    fn case(label: &str, left: Option<Vec<i32>>, right: Option<Vec<i32>>) -> AddCase {
        AddCase {
            label: Some(label.to_string()),
            left,
            right,
        }
    }

    #[tokio::test]
    async fn test_extract_top_level_array() {
        let storage = MockStorage::new();
        storage
            .put_file(
                "cases.json",
                br#"[{"label": "a", "left": [1], "right": [2]}]"#,
            )
            .await;

        let pipeline = CasePipeline::new(storage, MockConfig::new());
        let cases = pipeline.extract().await.unwrap();

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].label.as_deref(), Some("a"));
        assert_eq!(cases[0].left, Some(vec![1]));
    }

    #[tokio::test]
    async fn test_extract_object_with_cases_field() {
        let storage = MockStorage::new();
        storage
            .put_file(
                "cases.json",
                br#"{"cases": [{"left": [9, 9], "right": [1]}, {"right": [1]}]}"#,
            )
            .await;

        let pipeline = CasePipeline::new(storage, MockConfig::new());
        let cases = pipeline.extract().await.unwrap();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].left, Some(vec![9, 9]));
        // a missing operand deserializes as absent
        assert_eq!(cases[1].left, None);
    }

    #[tokio::test]
    async fn test_extract_rejects_unexpected_shapes() {
        let storage = MockStorage::new();
        storage.put_file("cases.json", br#"{"items": []}"#).await;
        let pipeline = CasePipeline::new(storage, MockConfig::new());
        assert!(matches!(
            pipeline.extract().await,
            Err(SumError::ProcessingError { .. })
        ));

        let storage = MockStorage::new();
        storage.put_file("cases.json", br#""not cases""#).await;
        let pipeline = CasePipeline::new(storage, MockConfig::new());
        assert!(matches!(
            pipeline.extract().await,
            Err(SumError::ProcessingError { .. })
        ));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let pipeline = CasePipeline::new(MockStorage::new(), MockConfig::new());
        assert!(matches!(
            pipeline.extract().await,
            Err(SumError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_transform_mixed_outcomes() {
        let pipeline = CasePipeline::new(MockStorage::new(), MockConfig::new());
        let cases = vec![
            case("no carry", Some(vec![4]), Some(vec![5])),
            case("cascade", Some(vec![9, 9, 9, 9]), Some(vec![1])),
            case("missing", None, Some(vec![1])),
            case("bad digit", Some(vec![10]), Some(vec![5])),
        ];

        let result = pipeline.transform(cases).await.unwrap();

        assert_eq!(result.summary.total, 4);
        assert_eq!(result.summary.summed, 2);
        assert_eq!(result.summary.absent, 1);
        assert_eq!(result.summary.invalid, 1);
        assert!(result.summary.finished_at >= result.summary.started_at);

        assert_eq!(
            result.outcomes[0].outcome,
            Outcome::Sum { digits: vec![9] }
        );
        assert_eq!(
            result.outcomes[1].outcome,
            Outcome::Sum {
                digits: vec![1, 0, 0, 0, 0]
            }
        );
        assert_eq!(result.outcomes[2].outcome, Outcome::Absent);
        assert!(matches!(
            result.outcomes[3].outcome,
            Outcome::Invalid { .. }
        ));

        // only the rejected case lands in the rejected list
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].case.label.as_deref(), Some("bad digit"));
    }

    #[tokio::test]
    async fn test_transform_csv_report() {
        let pipeline = CasePipeline::new(MockStorage::new(), MockConfig::new());
        let cases = vec![
            case("no carry", Some(vec![4]), Some(vec![5])),
            case("missing", None, Some(vec![1])),
        ];

        let result = pipeline.transform(cases).await.unwrap();
        let lines: Vec<&str> = result.csv_output.lines().collect();

        assert_eq!(lines.len(), 3); // header + 2 cases
        assert_eq!(lines[0], "label,left,right,status,result");
        assert_eq!(lines[1], "no carry,4,5,sum,9");
        assert_eq!(lines[2], "missing,,1,absent,");
    }

    #[tokio::test]
    async fn test_transform_empty_batch() {
        let pipeline = CasePipeline::new(MockStorage::new(), MockConfig::new());
        let result = pipeline.transform(Vec::new()).await.unwrap();

        assert_eq!(result.summary.total, 0);
        assert_eq!(result.outcomes.len(), 0);
        assert_eq!(result.csv_output.lines().count(), 1); // header only
    }

    #[tokio::test]
    async fn test_load_without_rejected_cases() {
        let storage = MockStorage::new();
        let pipeline = CasePipeline::new(storage.clone(), MockConfig::new());
        let result = pipeline
            .transform(vec![case("ok", Some(vec![1]), Some(vec![2]))])
            .await
            .unwrap();

        let output_path = pipeline.load(result).await.unwrap();
        assert_eq!(output_path, "test_output/addition_results.zip");

        let zip_bytes = storage.get_file("addition_results.zip").await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        assert_eq!(archive.len(), 2); // report and summary only

        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();
        assert_eq!(file_names, vec!["report.csv", "summary.json"]);
    }

    #[tokio::test]
    async fn test_load_with_rejected_cases() {
        let storage = MockStorage::new();
        let pipeline = CasePipeline::new(storage.clone(), MockConfig::new());
        let result = pipeline
            .transform(vec![
                case("ok", Some(vec![1]), Some(vec![2])),
                case("bad", Some(vec![-1]), Some(vec![2])),
            ])
            .await
            .unwrap();

        pipeline.load(result).await.unwrap();

        let zip_bytes = storage.get_file("addition_results.zip").await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        assert_eq!(archive.len(), 3);

        let rejected: Vec<CaseOutcome> = {
            let mut file = archive.by_name("rejected.json").unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut file, &mut content).unwrap();
            serde_json::from_str(&content).unwrap()
        };
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].case.label.as_deref(), Some("bad"));
    }

    #[tokio::test]
    async fn test_load_summary_content() {
        let storage = MockStorage::new();
        let pipeline = CasePipeline::new(storage.clone(), MockConfig::new());
        let result = pipeline
            .transform(vec![
                case("ok", Some(vec![7]), Some(vec![5])),
                case("missing", None, None),
            ])
            .await
            .unwrap();

        pipeline.load(result).await.unwrap();

        let zip_bytes = storage.get_file("addition_results.zip").await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        let summary: BatchSummary = {
            let mut file = archive.by_name("summary.json").unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut file, &mut content).unwrap();
            serde_json::from_str(&content).unwrap()
        };
        assert_eq!(summary.total, 2);
        assert_eq!(summary.summed, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.invalid, 0);
    }
}

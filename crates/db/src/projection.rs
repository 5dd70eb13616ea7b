//! Annotation projection: attach each log's ordered annotations.

use std::collections::HashMap;

use sqlx::postgres::PgExecutor;

use crate::models::annotation::Annotation;
use crate::models::log::{Log, LogWithAnnotations};
use crate::repositories::AnnotationRepo;

/// Load the annotations of `logs` in one query and embed them.
///
/// Log order is preserved; each annotation list is ascending by position.
pub async fn project_annotations<'e, E: PgExecutor<'e>>(
    executor: E,
    logs: Vec<Log>,
) -> Result<Vec<LogWithAnnotations>, sqlx::Error> {
    if logs.is_empty() {
        return Ok(Vec::new());
    }
    let log_ids: Vec<String> = logs.iter().map(|log| log.id.clone()).collect();
    let annotations = AnnotationRepo::list_by_logs(executor, &log_ids).await?;
    Ok(attach_annotations(logs, annotations))
}

/// Group `annotations` by log id and attach them to the matching log.
///
/// Annotations whose log is not in `logs` are dropped. Logs without
/// annotations get an empty list.
pub fn attach_annotations(logs: Vec<Log>, annotations: Vec<Annotation>) -> Vec<LogWithAnnotations> {
    let mut by_log: HashMap<String, Vec<Annotation>> = HashMap::new();
    for annotation in annotations {
        by_log
            .entry(annotation.log_id.clone())
            .or_default()
            .push(annotation);
    }

    logs.into_iter()
        .map(|log| {
            let mut annotations = by_log.remove(&log.id).unwrap_or_default();
            sort_by_position(&mut annotations);
            LogWithAnnotations { log, annotations }
        })
        .collect()
}

/// Sort ascending by position, ties broken by insertion id.
pub fn sort_by_position(annotations: &mut [Annotation]) {
    annotations.sort_by(|a, b| a.position.total_cmp(&b.position).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn log(id: &str, log_number: i32) -> Log {
        Log {
            id: id.to_string(),
            heat_id: 1,
            log_number,
            name: None,
            finished_diameter: None,
            finished_length: None,
            unit: String::new(),
            transducer: String::new(),
            calibration: String::new(),
            gain: None,
            prf: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn annotation(id: i64, log_id: &str, position: f64) -> Annotation {
        Annotation {
            id,
            log_id: log_id.to_string(),
            position,
            annotation_type: "crack".to_string(),
            note: None,
            comment: None,
            depth: None,
            hash: None,
            inspector: None,
            user_name: None,
            user_role: None,
            user_color: None,
            created_at: Utc::now(),
        }
    }

    fn positions(log: &LogWithAnnotations) -> Vec<f64> {
        log.annotations.iter().map(|a| a.position).collect()
    }

    #[test]
    fn groups_by_log_and_sorts_by_position() {
        let logs = vec![log("L1", 1), log("L2", 2)];
        let annotations = vec![
            annotation(1, "L1", 3.0),
            annotation(2, "L2", 9.0),
            annotation(3, "L1", 1.0),
            annotation(4, "L1", 2.0),
        ];

        let projected = attach_annotations(logs, annotations);

        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].log.id, "L1");
        assert_eq!(positions(&projected[0]), vec![1.0, 2.0, 3.0]);
        assert_eq!(positions(&projected[1]), vec![9.0]);
    }

    #[test]
    fn log_without_annotations_gets_empty_list() {
        let projected = attach_annotations(vec![log("L1", 1)], Vec::new());
        assert!(projected[0].annotations.is_empty());
    }

    #[test]
    fn preserves_log_order() {
        let projected = attach_annotations(vec![log("B", 2), log("A", 1)], Vec::new());
        let ids: Vec<&str> = projected.iter().map(|l| l.log.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn equal_positions_fall_back_to_id() {
        let mut annotations = vec![annotation(7, "L1", 1.0), annotation(3, "L1", 1.0)];
        sort_by_position(&mut annotations);
        assert_eq!(annotations[0].id, 3);
    }

    #[test]
    fn orphan_annotations_are_dropped() {
        let projected = attach_annotations(vec![log("L1", 1)], vec![annotation(1, "L9", 1.0)]);
        assert!(projected[0].annotations.is_empty());
    }

    #[test]
    fn serialized_log_embeds_annotations_with_type_key() {
        let projected = attach_annotations(vec![log("L1", 1)], vec![annotation(1, "L1", 5.0)]);
        let json = serde_json::to_value(&projected[0]).unwrap();
        assert_eq!(json["id"], "L1");
        assert_eq!(json["annotations"][0]["type"], "crack");
        assert_eq!(json["annotations"][0]["position"].as_f64(), Some(5.0));
    }
}

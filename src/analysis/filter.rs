//! Platform filtering.

use crate::models::{Document, Platform, Stage};

/// Restrict a document to the tasks visible on `platform`.
///
/// Tasks tagged with `platform` or `Both` are kept. Stages left without
/// tasks are dropped. Stage and task order is preserved.
pub fn filter_by_platform(document: &Document, platform: Platform) -> Document {
    let stages = document
        .stages
        .iter()
        .filter_map(|stage| {
            let tasks: Vec<_> = stage
                .tasks
                .iter()
                .filter(|task| platform.includes(task.platform))
                .cloned()
                .collect();

            if tasks.is_empty() {
                None
            } else {
                Some(Stage {
                    name: stage.name.clone(),
                    tasks,
                })
            }
        })
        .collect();

    Document { stages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn task(id: &str, platform: Option<Platform>) -> Task {
        Task {
            id: id.to_string(),
            name: format!("Task {}", id),
            platform,
            subtasks: vec![],
        }
    }

    fn stage(name: &str, tasks: Vec<Task>) -> Stage {
        Stage {
            name: name.to_string(),
            tasks,
        }
    }

    fn sample_document() -> Document {
        Document {
            stages: vec![
                stage(
                    "Mixed",
                    vec![
                        task("w1", Some(Platform::Web)),
                        task("a1", Some(Platform::App)),
                        task("b1", Some(Platform::Both)),
                        task("n1", None),
                        task("w2", Some(Platform::Web)),
                    ],
                ),
                stage("App only", vec![task("a2", Some(Platform::App))]),
                stage("Untagged", vec![task("n2", None)]),
                stage("Empty", vec![]),
            ],
        }
    }

    fn ids(document: &Document) -> Vec<Vec<&str>> {
        document
            .stages
            .iter()
            .map(|s| s.tasks.iter().map(|t| t.id.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_filter_web() {
        let filtered = filter_by_platform(&sample_document(), Platform::Web);

        assert_eq!(filtered.stages.len(), 1);
        assert_eq!(filtered.stages[0].name, "Mixed");
        assert_eq!(ids(&filtered), vec![vec!["w1", "b1", "w2"]]);
    }

    #[test]
    fn test_filter_app() {
        let filtered = filter_by_platform(&sample_document(), Platform::App);

        let names: Vec<_> = filtered.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mixed", "App only"]);
        assert_eq!(ids(&filtered), vec![vec!["a1", "b1"], vec!["a2"]]);
    }

    #[test]
    fn test_filtered_tasks_match_platform_or_both() {
        let document = sample_document();
        for platform in Platform::REPORTED {
            let filtered = filter_by_platform(&document, platform);
            for task in filtered.stages.iter().flat_map(|s| &s.tasks) {
                assert!(
                    task.platform == Some(platform) || task.platform == Some(Platform::Both),
                    "task {} leaked into {} view",
                    task.id,
                    platform
                );
            }
        }
    }

    #[test]
    fn test_filter_empty_document() {
        let filtered = filter_by_platform(&Document::default(), Platform::Web);
        assert!(filtered.stages.is_empty());
    }
}

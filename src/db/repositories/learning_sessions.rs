use anyhow::{anyhow, Result};
use rusqlite::{params, params_from_iter, types::Value, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{
        format_datetime, like_pattern, now_micros, parse_datetime, title_key, to_u32, to_u8,
    },
    models::{
        HistoryPage, HistoryQuery, HistoryStats, LearningSession, LearningSessionUpdate,
        NewLearningSession, MAX_PAGE_SIZE,
    },
};

const SESSION_COLUMNS: &str = "id, user_id, lesson_title, lesson_content, user_understanding, \
     ai_feedback, comprehension_score, category, time_spent, created_at, updated_at";

fn row_to_learning_session(row: &Row) -> Result<LearningSession> {
    let score: i64 = row.get("comprehension_score")?;
    let time_spent: Option<i64> = row.get("time_spent")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(LearningSession {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        lesson_title: row.get("lesson_title")?,
        lesson_content: row.get("lesson_content")?,
        user_understanding: row.get("user_understanding")?,
        ai_feedback: row.get("ai_feedback")?,
        comprehension_score: to_u8(score, "comprehension_score")?,
        category: row.get("category")?,
        time_spent: time_spent
            .map(|minutes| to_u32(minutes, "time_spent"))
            .transpose()?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

fn select_by_owner(
    conn: &rusqlite::Connection,
    id: &str,
    user_id: &str,
) -> Result<Option<LearningSession>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SESSION_COLUMNS} FROM learning_sessions WHERE id = ?1 AND user_id = ?2"
    ))?;
    let mut rows = stmt.query(params![id, user_id])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_learning_session(row)?)),
        None => Ok(None),
    }
}

/// WHERE clause and bound values shared by the count and page queries.
fn history_filter(user_id: &str, query: &HistoryQuery) -> (String, Vec<Value>) {
    let mut clause = String::from("user_id = ?");
    let mut values = vec![Value::Text(user_id.to_string())];

    if let Some(term) = query.search_term() {
        clause.push_str(" AND title_key LIKE ? ESCAPE '\\'");
        values.push(Value::Text(like_pattern(&title_key(term))));
    }

    if let Some(category) = query.category_filter() {
        clause.push_str(" AND category = ?");
        values.push(Value::Text(category.to_string()));
    }

    (clause, values)
}

impl Database {
    pub async fn create_learning_session(
        &self,
        input: NewLearningSession,
    ) -> Result<LearningSession> {
        self.execute(move |conn| {
            let now = now_micros();
            let session = LearningSession {
                id: Uuid::new_v4().to_string(),
                user_id: input.user_id,
                lesson_title: input.lesson_title,
                lesson_content: input.lesson_content,
                user_understanding: input.user_understanding,
                ai_feedback: input.ai_feedback,
                comprehension_score: input.comprehension_score.min(100),
                category: input.category.filter(|c| !c.trim().is_empty()),
                time_spent: input.time_spent,
                created_at: now,
                updated_at: now,
            };

            conn.execute(
                "INSERT INTO learning_sessions (id, user_id, lesson_title, title_key, lesson_content, user_understanding, ai_feedback, comprehension_score, category, time_spent, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    session.id,
                    session.user_id,
                    session.lesson_title,
                    title_key(&session.lesson_title),
                    session.lesson_content,
                    session.user_understanding,
                    session.ai_feedback,
                    session.comprehension_score,
                    session.category,
                    session.time_spent,
                    format_datetime(&session.created_at),
                    format_datetime(&session.updated_at),
                ],
            )?;

            Ok(session)
        })
        .await
    }

    pub async fn get_learning_session(&self, id: &str) -> Result<Option<LearningSession>> {
        let id = id.to_string();
        self.execute(move |conn| {
            let session = conn
                .query_row(
                    &format!("SELECT {SESSION_COLUMNS} FROM learning_sessions WHERE id = ?1"),
                    params![id],
                    |row| Ok(row_to_learning_session(row)),
                )
                .optional()?
                .transpose()?;
            Ok(session)
        })
        .await
    }

    /// Apply `update` to a session owned by `user_id`. Returns `None` when no
    /// such session exists for that owner.
    pub async fn update_learning_session(
        &self,
        id: &str,
        user_id: &str,
        update: LearningSessionUpdate,
    ) -> Result<Option<LearningSession>> {
        let id = id.to_string();
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let Some(mut session) = select_by_owner(&tx, &id, &user_id)? else {
                return Ok(None);
            };

            if let Some(title) = update.lesson_title {
                session.lesson_title = title;
            }
            if let Some(understanding) = update.user_understanding {
                session.user_understanding = understanding;
            }
            if let Some(feedback) = update.ai_feedback {
                session.ai_feedback = feedback;
            }
            if let Some(score) = update.comprehension_score {
                session.comprehension_score = score.min(100);
            }
            if let Some(category) = update.category {
                session.category = Some(category).filter(|c| !c.trim().is_empty());
            }
            if let Some(minutes) = update.time_spent {
                session.time_spent = Some(minutes);
            }
            session.updated_at = now_micros();

            tx.execute(
                "UPDATE learning_sessions
                 SET lesson_title = ?1,
                     title_key = ?2,
                     user_understanding = ?3,
                     ai_feedback = ?4,
                     comprehension_score = ?5,
                     category = ?6,
                     time_spent = ?7,
                     updated_at = ?8
                 WHERE id = ?9 AND user_id = ?10",
                params![
                    session.lesson_title,
                    title_key(&session.lesson_title),
                    session.user_understanding,
                    session.ai_feedback,
                    session.comprehension_score,
                    session.category,
                    session.time_spent,
                    format_datetime(&session.updated_at),
                    id,
                    user_id,
                ],
            )?;
            tx.commit()?;

            Ok(Some(session))
        })
        .await
    }

    /// Delete a session if it belongs to `user_id`. Returns whether a row went away.
    pub async fn delete_learning_session(&self, id: &str, user_id: &str) -> Result<bool> {
        let id = id.to_string();
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "DELETE FROM learning_sessions WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn learning_session_history(
        &self,
        user_id: &str,
        query: HistoryQuery,
    ) -> Result<HistoryPage> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let page = query.page.max(1);
            let page_size = query.page_size.clamp(1, MAX_PAGE_SIZE);
            let (clause, values) = history_filter(&user_id, &query);

            let total_count: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM learning_sessions WHERE {clause}"),
                params_from_iter(values.iter()),
                |row| row.get(0),
            )?;
            let total_count = u64::try_from(total_count)
                .map_err(|_| anyhow!("negative session count {total_count}"))?;

            let offset = i64::try_from(u64::from(page - 1) * u64::from(page_size))
                .map_err(|_| anyhow!("page {page} is out of range"))?;
            let mut page_values = values;
            page_values.push(Value::Integer(i64::from(page_size)));
            page_values.push(Value::Integer(offset));

            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM learning_sessions
                 WHERE {clause}
                 ORDER BY {}
                 LIMIT ? OFFSET ?",
                query.sort_by.order_clause()
            ))?;
            let mut rows = stmt.query(params_from_iter(page_values.iter()))?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_learning_session(row)?);
            }

            let total_pages = u32::try_from(total_count.div_ceil(u64::from(page_size)))
                .map_err(|_| anyhow!("page count overflow"))?;

            Ok(HistoryPage {
                sessions,
                page,
                page_size,
                total_count,
                total_pages,
            })
        })
        .await
    }

    /// Distinct non-empty categories used by `user_id`, alphabetically.
    pub async fn learning_session_categories(&self, user_id: &str) -> Result<Vec<String>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT category FROM learning_sessions
                 WHERE user_id = ?1 AND category IS NOT NULL AND TRIM(category) <> ''
                 ORDER BY category ASC",
            )?;
            let categories = stmt
                .query_map(params![user_id], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(categories)
        })
        .await
    }

    pub async fn learning_session_stats(&self, user_id: &str) -> Result<HistoryStats> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let (count, average, best, minutes): (i64, Option<f64>, Option<i64>, i64) = conn
                .query_row(
                    "SELECT COUNT(*), AVG(comprehension_score), MAX(comprehension_score), COALESCE(SUM(time_spent), 0)
                     FROM learning_sessions
                     WHERE user_id = ?1",
                    params![user_id],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
                )?;

            Ok(HistoryStats {
                total_sessions: u64::try_from(count)
                    .map_err(|_| anyhow!("negative session count {count}"))?,
                average_score: average.map(|avg| (avg * 10.0).round() / 10.0).unwrap_or(0.0),
                best_score: best.map(|b| to_u8(b, "comprehension_score")).transpose()?.unwrap_or(0),
                total_minutes: u64::try_from(minutes)
                    .map_err(|_| anyhow!("negative total time {minutes}"))?,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::HistorySort;
    use tempfile::TempDir;

    async fn open() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("learnai.db")).unwrap();
        (dir, db)
    }

    fn new_session(user: &str, title: &str, score: u8, category: Option<&str>) -> NewLearningSession {
        NewLearningSession {
            user_id: user.to_string(),
            lesson_title: title.to_string(),
            lesson_content: format!("{title} content"),
            user_understanding: "my understanding".to_string(),
            ai_feedback: "Good".to_string(),
            comprehension_score: score,
            category: category.map(str::to_string),
            time_spent: Some(5),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let (_dir, db) = open().await;
        let created = db
            .create_learning_session(new_session("u1", "Cells", 80, Some("biology")))
            .await
            .unwrap();

        let fetched = db.get_learning_session(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(db.get_learning_session("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_is_scoped_to_owner() {
        let (_dir, db) = open().await;
        let created = db
            .create_learning_session(new_session("u1", "Cells", 40, None))
            .await
            .unwrap();

        let update = LearningSessionUpdate {
            comprehension_score: Some(90),
            category: Some("biology".into()),
            ..Default::default()
        };
        assert!(db
            .update_learning_session(&created.id, "intruder", update.clone())
            .await
            .unwrap()
            .is_none());

        let updated = db
            .update_learning_session(&created.id, "u1", update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.comprehension_score, 90);
        assert_eq!(updated.category.as_deref(), Some("biology"));
        assert_eq!(updated.lesson_title, "Cells");
        assert!(updated.updated_at >= created.updated_at);

        let stored = db.get_learning_session(&created.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn delete_only_by_owner() {
        let (_dir, db) = open().await;
        let created = db
            .create_learning_session(new_session("u1", "Cells", 40, None))
            .await
            .unwrap();

        assert!(!db.delete_learning_session(&created.id, "u2").await.unwrap());
        assert!(db.get_learning_session(&created.id).await.unwrap().is_some());
        assert!(db.delete_learning_session(&created.id, "u1").await.unwrap());
        assert!(db.get_learning_session(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn history_filters_sorts_and_pages() {
        let (_dir, db) = open().await;
        for (title, score, category) in [
            ("Photosynthesis", 70, Some("biology")),
            ("Cell Division", 95, Some("biology")),
            ("Algebra 100%", 55, Some("math")),
            ("Organic Chemistry", 82, None),
            ("Économie Basics", 64, Some("economics")),
        ] {
            db.create_learning_session(new_session("u1", title, score, category))
                .await
                .unwrap();
        }
        db.create_learning_session(new_session("u2", "Photosynthesis", 10, None))
            .await
            .unwrap();

        let newest = db
            .learning_session_history("u1", HistoryQuery::default())
            .await
            .unwrap();
        assert_eq!(newest.total_count, 5);
        assert_eq!(newest.total_pages, 1);
        assert_eq!(newest.sessions[0].lesson_title, "Économie Basics");
        assert_eq!(newest.sessions[4].lesson_title, "Photosynthesis");

        let by_score = db
            .learning_session_history(
                "u1",
                HistoryQuery {
                    sort_by: HistorySort::Score,
                    page_size: 3,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let scores: Vec<u8> = by_score.sessions.iter().map(|s| s.comprehension_score).collect();
        assert_eq!(scores, vec![95, 82, 70]);
        assert_eq!(by_score.total_pages, 2);

        let second_page = db
            .learning_session_history(
                "u1",
                HistoryQuery {
                    sort_by: HistorySort::Score,
                    page: 2,
                    page_size: 3,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let scores: Vec<u8> = second_page.sessions.iter().map(|s| s.comprehension_score).collect();
        assert_eq!(scores, vec![64, 55]);

        let biology_by_title = db
            .learning_session_history(
                "u1",
                HistoryQuery {
                    category: Some("biology".into()),
                    sort_by: HistorySort::Title,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let titles: Vec<_> = biology_by_title
            .sessions
            .iter()
            .map(|s| s.lesson_title.as_str())
            .collect();
        assert_eq!(titles, vec!["Cell Division", "Photosynthesis"]);

        let all = db
            .learning_session_history(
                "u1",
                HistoryQuery {
                    category: Some("all".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(all.total_count, 5);

        let search = db
            .learning_session_history(
                "u1",
                HistoryQuery {
                    search: Some("PHOTO".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(search.total_count, 1);

        let literal_percent = db
            .learning_session_history(
                "u1",
                HistoryQuery {
                    search: Some("100%".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(literal_percent.total_count, 1);
        assert_eq!(literal_percent.sessions[0].lesson_title, "Algebra 100%");

        for term in ["économie", "ÉCONOMIE BASICS"] {
            let accented = db
                .learning_session_history(
                    "u1",
                    HistoryQuery {
                        search: Some(term.into()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(accented.total_count, 1, "search {term:?}");
            assert_eq!(accented.sessions[0].lesson_title, "Économie Basics");
        }
    }

    #[tokio::test]
    async fn title_sort_ignores_case_and_renames_follow() {
        let (_dir, db) = open().await;
        for title in ["Zebra Studies", "apple orchards", "Économie Basics"] {
            db.create_learning_session(new_session("u1", title, 50, None))
                .await
                .unwrap();
        }
        let by_title = HistoryQuery {
            sort_by: HistorySort::Title,
            ..Default::default()
        };

        let page = db.learning_session_history("u1", by_title.clone()).await.unwrap();
        let titles: Vec<_> = page.sessions.iter().map(|s| s.lesson_title.as_str()).collect();
        assert_eq!(titles, vec!["apple orchards", "Zebra Studies", "Économie Basics"]);

        let zebra = page.sessions[1].id.clone();
        db.update_learning_session(
            &zebra,
            "u1",
            LearningSessionUpdate {
                lesson_title: Some("Aardvark Notes".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        let page = db.learning_session_history("u1", by_title).await.unwrap();
        assert_eq!(page.sessions[0].lesson_title, "Aardvark Notes");

        let renamed = db
            .learning_session_history(
                "u1",
                HistoryQuery {
                    search: Some("AARDVARK".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.total_count, 1);
    }

    #[tokio::test]
    async fn huge_page_numbers_return_an_empty_page() {
        let (_dir, db) = open().await;
        db.create_learning_session(new_session("u1", "Cells", 80, None))
            .await
            .unwrap();

        let far = db
            .learning_session_history(
                "u1",
                HistoryQuery {
                    page: u32::MAX,
                    page_size: u32::MAX,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(far.sessions.is_empty());
        assert_eq!(far.page, u32::MAX);
        assert_eq!(far.page_size, MAX_PAGE_SIZE);
        assert_eq!(far.total_count, 1);
        assert_eq!(far.total_pages, 1);

        let first = db
            .learning_session_history("u1", HistoryQuery::default())
            .await
            .unwrap();
        assert_eq!(first.sessions.len(), 1);
    }

    #[tokio::test]
    async fn empty_history_has_zero_pages() {
        let (_dir, db) = open().await;
        let page = db
            .learning_session_history(
                "nobody",
                HistoryQuery {
                    page: 0,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.sessions.is_empty());
    }

    #[tokio::test]
    async fn categories_and_stats_per_user() {
        let (_dir, db) = open().await;
        for (score, category) in [(60, Some("math")), (90, Some("biology")), (75, Some("math")), (30, None)] {
            db.create_learning_session(new_session("u1", "Lesson", score, category))
                .await
                .unwrap();
        }
        db.create_learning_session(new_session("u2", "Lesson", 100, Some("art")))
            .await
            .unwrap();

        let categories = db.learning_session_categories("u1").await.unwrap();
        assert_eq!(categories, vec!["biology", "math"]);

        let stats = db.learning_session_stats("u1").await.unwrap();
        assert_eq!(stats.total_sessions, 4);
        assert_eq!(stats.best_score, 90);
        assert!((stats.average_score - 63.8).abs() < 1e-9);
        assert_eq!(stats.total_minutes, 20);

        let empty = db.learning_session_stats("nobody").await.unwrap();
        assert_eq!(empty, HistoryStats::default());
    }
}

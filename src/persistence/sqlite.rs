//! SQLite analytics store for completed events.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::models::CompletionRecord;
#[cfg(test)]
use super::models::EventAnalyticsRow;
use crate::error::GatewayError;

const SCHEMA: [&str; 7] = [
    "CREATE TABLE IF NOT EXISTS events_analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id TEXT UNIQUE NOT NULL,
        event_title TEXT NOT NULL,
        event_date DATE,
        event_status TEXT DEFAULT 'completed',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        completed_at TIMESTAMP,
        total_capacity INTEGER DEFAULT 0,
        total_tickets_sold INTEGER DEFAULT 0,
        total_revenue DECIMAL(15,2) DEFAULT 0.00,
        ticket_price DECIMAL(10,2) DEFAULT 0.00,
        currency TEXT DEFAULT 'INR',
        live_attendance INTEGER DEFAULT 0,
        peak_attendance INTEGER DEFAULT 0,
        avg_attendance DECIMAL(8,2) DEFAULT 0.00,
        attendance_duration_minutes INTEGER DEFAULT 0,
        total_polls INTEGER DEFAULT 0,
        total_poll_responses INTEGER DEFAULT 0,
        total_qa_questions INTEGER DEFAULT 0,
        total_qa_answered INTEGER DEFAULT 0,
        engagement_rate DECIMAL(5,2) DEFAULT 0.00,
        conversion_rate DECIMAL(5,2) DEFAULT 0.00,
        satisfaction_score DECIMAL(3,2) DEFAULT 0.00,
        nps_score DECIMAL(4,1) DEFAULT 0.00,
        recommendation_rate DECIMAL(5,2) DEFAULT 0.00
    )",
    "CREATE TABLE IF NOT EXISTS poll_analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id TEXT NOT NULL,
        poll_id INTEGER NOT NULL,
        poll_question TEXT NOT NULL,
        poll_type TEXT DEFAULT 'multiple_choice',
        total_responses INTEGER DEFAULT 0,
        created_at TIMESTAMP,
        response_rate DECIMAL(5,2) DEFAULT 0.00,
        most_popular_option TEXT,
        most_popular_percentage DECIMAL(5,2) DEFAULT 0.00,
        FOREIGN KEY (event_id) REFERENCES events_analytics(event_id)
    )",
    "CREATE TABLE IF NOT EXISTS poll_options_analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id TEXT NOT NULL,
        poll_id INTEGER NOT NULL,
        option_text TEXT NOT NULL,
        vote_count INTEGER DEFAULT 0,
        percentage DECIMAL(5,2) DEFAULT 0.00,
        FOREIGN KEY (event_id) REFERENCES events_analytics(event_id)
    )",
    "CREATE TABLE IF NOT EXISTS qa_analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id TEXT NOT NULL,
        question_id INTEGER NOT NULL,
        question_text TEXT NOT NULL,
        category TEXT DEFAULT 'general',
        sentiment TEXT DEFAULT 'neutral',
        priority_level TEXT DEFAULT 'medium',
        vote_count INTEGER DEFAULT 0,
        is_answered BOOLEAN DEFAULT 0,
        response_time_minutes INTEGER DEFAULT NULL,
        created_at TIMESTAMP,
        FOREIGN KEY (event_id) REFERENCES events_analytics(event_id)
    )",
    "CREATE TABLE IF NOT EXISTS engagement_timeline (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id TEXT NOT NULL,
        timestamp TIMESTAMP NOT NULL,
        activity_type TEXT NOT NULL,
        activity_data TEXT,
        attendance_at_time INTEGER DEFAULT 0,
        FOREIGN KEY (event_id) REFERENCES events_analytics(event_id)
    )",
    "CREATE TABLE IF NOT EXISTS sentiment_analysis (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id TEXT NOT NULL,
        content_type TEXT NOT NULL,
        content_id INTEGER,
        sentiment_score DECIMAL(4,3) DEFAULT 0.000,
        sentiment_label TEXT DEFAULT 'neutral',
        confidence DECIMAL(4,3) DEFAULT 0.000,
        keywords TEXT,
        FOREIGN KEY (event_id) REFERENCES events_analytics(event_id)
    )",
    "CREATE TABLE IF NOT EXISTS event_insights (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id TEXT NOT NULL,
        insight_type TEXT NOT NULL,
        insight_category TEXT NOT NULL,
        insight_text TEXT NOT NULL,
        confidence_score DECIMAL(4,3) DEFAULT 0.000,
        supporting_data TEXT,
        FOREIGN KEY (event_id) REFERENCES events_analytics(event_id)
    )",
];

/// Per-table row counts for one event.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapturedCounts {
    /// Rows in `poll_analytics`.
    pub polls: i64,
    /// Rows in `poll_options_analytics`.
    pub poll_options: i64,
    /// Rows in `qa_analytics`.
    pub questions: i64,
    /// Rows in `event_insights`.
    pub insights: i64,
    /// Rows in `sentiment_analysis`.
    pub sentiments: i64,
}

/// SQLite-backed store for completion captures.
#[derive(Debug, Clone)]
pub struct AnalyticsStore {
    pool: SqlitePool,
}

impl AnalyticsStore {
    /// Opens (creating if missing) the database at `url` and ensures the
    /// schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the URL is invalid or
    /// the database cannot be opened.
    pub async fn connect(url: &str) -> Result<Self, GatewayError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?
            .create_if_missing(true);

        if let Some(parent) = options
            .get_filename()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        // One connection keeps in-memory databases shared across queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let store = Self { pool };
        store.init_schema().await?;
        tracing::debug!(url, "analytics schema ensured");
        Ok(store)
    }

    /// Creates the analytics tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn init_schema(&self) -> Result<(), GatewayError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        }
        Ok(())
    }

    /// Writes every row of a completion capture in one transaction.
    ///
    /// The main row replaces any earlier capture of the same event; child
    /// rows are appended.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure. No
    /// rows are written in that case.
    pub async fn capture(&self, record: &CompletionRecord) -> Result<(), GatewayError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let row = &record.event;
        sqlx::query(
            "INSERT OR REPLACE INTO events_analytics (
                event_id, event_title, event_date, event_status, completed_at,
                total_capacity, total_tickets_sold, total_revenue, ticket_price, currency,
                live_attendance, peak_attendance, avg_attendance, attendance_duration_minutes,
                total_polls, total_poll_responses, total_qa_questions, total_qa_answered,
                engagement_rate, conversion_rate, satisfaction_score, nps_score, recommendation_rate
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.event_id)
        .bind(&row.event_title)
        .bind(&row.event_date)
        .bind(&row.event_status)
        .bind(row.completed_at)
        .bind(row.total_capacity)
        .bind(row.total_tickets_sold)
        .bind(row.total_revenue)
        .bind(row.ticket_price)
        .bind(&row.currency)
        .bind(row.live_attendance)
        .bind(row.peak_attendance)
        .bind(row.avg_attendance)
        .bind(row.attendance_duration_minutes)
        .bind(row.total_polls)
        .bind(row.total_poll_responses)
        .bind(row.total_qa_questions)
        .bind(row.total_qa_answered)
        .bind(row.engagement_rate)
        .bind(row.conversion_rate)
        .bind(row.satisfaction_score)
        .bind(row.nps_score)
        .bind(row.recommendation_rate)
        .execute(&mut *tx)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        for poll in &record.polls {
            sqlx::query(
                "INSERT INTO poll_analytics (
                    event_id, poll_id, poll_question, poll_type, total_responses,
                    created_at, response_rate, most_popular_option, most_popular_percentage
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&poll.event_id)
            .bind(poll.poll_id)
            .bind(&poll.poll_question)
            .bind(&poll.poll_type)
            .bind(poll.total_responses)
            .bind(poll.created_at)
            .bind(poll.response_rate)
            .bind(&poll.most_popular_option)
            .bind(poll.most_popular_percentage)
            .execute(&mut *tx)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        }

        for option in &record.poll_options {
            sqlx::query(
                "INSERT INTO poll_options_analytics (
                    event_id, poll_id, option_text, vote_count, percentage
                ) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&option.event_id)
            .bind(option.poll_id)
            .bind(&option.option_text)
            .bind(option.vote_count)
            .bind(option.percentage)
            .execute(&mut *tx)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        }

        for q in &record.questions {
            sqlx::query(
                "INSERT INTO qa_analytics (
                    event_id, question_id, question_text, category, sentiment,
                    priority_level, vote_count, is_answered, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&q.event_id)
            .bind(q.question_id)
            .bind(&q.question_text)
            .bind(&q.category)
            .bind(&q.sentiment)
            .bind(&q.priority_level)
            .bind(q.vote_count)
            .bind(q.is_answered)
            .bind(q.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        }

        for insight in &record.insights {
            sqlx::query(
                "INSERT INTO event_insights (
                    event_id, insight_type, insight_category, insight_text,
                    confidence_score, supporting_data
                ) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&insight.event_id)
            .bind(&insight.insight_type)
            .bind(&insight.insight_category)
            .bind(&insight.insight_text)
            .bind(insight.confidence_score)
            .bind(&insight.supporting_data)
            .execute(&mut *tx)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        }

        for s in &record.sentiments {
            sqlx::query(
                "INSERT INTO sentiment_analysis (
                    event_id, content_type, content_id, sentiment_score,
                    sentiment_label, confidence, keywords
                ) VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&s.event_id)
            .bind(&s.content_type)
            .bind(s.content_id)
            .bind(s.sentiment_score)
            .bind(&s.sentiment_label)
            .bind(s.confidence)
            .bind(&s.keywords)
            .execute(&mut *tx)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        tracing::info!(
            event_id = %record.event.event_id,
            polls = record.polls.len(),
            questions = record.questions.len(),
            insights = record.insights.len(),
            "event analytics captured"
        );
        Ok(())
    }
}

// Read-backs for verifying captures. The service itself only writes.
#[cfg(test)]
impl AnalyticsStore {
    /// Loads the main row for one event, if it was captured.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn load_event(&self, event_id: u64) -> Result<Option<EventAnalyticsRow>, GatewayError> {
        type Head = (
            String,
            String,
            String,
            String,
            chrono::NaiveDateTime,
            i64,
            i64,
            i64,
            i64,
            String,
            i64,
            i64,
            f64,
            i64,
        );
        type Tail = (i64, i64, i64, i64, f64, f64, f64, f64, f64);

        // Tuple rows decode at most 16 columns, so the row is read in two halves.
        // DECIMAL columns have NUMERIC affinity and keep whole reals as
        // integers, hence the casts.
        let head = sqlx::query_as::<_, Head>(
            "SELECT event_id, event_title, event_date, event_status, completed_at, \
             total_capacity, total_tickets_sold, total_revenue, ticket_price, currency, \
             live_attendance, peak_attendance, CAST(avg_attendance AS REAL), \
             attendance_duration_minutes \
             FROM events_analytics WHERE event_id = ?",
        )
        .bind(event_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let Some(head) = head else {
            return Ok(None);
        };

        let tail = sqlx::query_as::<_, Tail>(
            "SELECT total_polls, total_poll_responses, total_qa_questions, total_qa_answered, \
             CAST(engagement_rate AS REAL), CAST(conversion_rate AS REAL), \
             CAST(satisfaction_score AS REAL), CAST(nps_score AS REAL), \
             CAST(recommendation_rate AS REAL) \
             FROM events_analytics WHERE event_id = ?",
        )
        .bind(event_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(Some(EventAnalyticsRow {
            event_id: head.0,
            event_title: head.1,
            event_date: head.2,
            event_status: head.3,
            completed_at: head.4,
            total_capacity: head.5,
            total_tickets_sold: head.6,
            total_revenue: head.7,
            ticket_price: head.8,
            currency: head.9,
            live_attendance: head.10,
            peak_attendance: head.11,
            avg_attendance: head.12,
            attendance_duration_minutes: head.13,
            total_polls: tail.0,
            total_poll_responses: tail.1,
            total_qa_questions: tail.2,
            total_qa_answered: tail.3,
            engagement_rate: tail.4,
            conversion_rate: tail.5,
            satisfaction_score: tail.6,
            nps_score: tail.7,
            recommendation_rate: tail.8,
        }))
    }

    /// Counts the child rows stored for one event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn counts(&self, event_id: u64) -> Result<CapturedCounts, GatewayError> {
        Ok(CapturedCounts {
            polls: self.count_rows("poll_analytics", event_id).await?,
            poll_options: self.count_rows("poll_options_analytics", event_id).await?,
            questions: self.count_rows("qa_analytics", event_id).await?,
            insights: self.count_rows("event_insights", event_id).await?,
            sentiments: self.count_rows("sentiment_analysis", event_id).await?,
        })
    }

    async fn count_rows(&self, table: &str, event_id: u64) -> Result<i64, GatewayError> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table} WHERE event_id = ?"))
            .bind(event_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))
    }

    /// Insight texts stored for one event, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn insight_texts(&self, event_id: u64) -> Result<Vec<(String, String)>, GatewayError> {
        sqlx::query_as::<_, (String, String)>(
            "SELECT insight_type, insight_text FROM event_insights WHERE event_id = ? ORDER BY id",
        )
        .bind(event_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::analytics::completion::{CompletionSnapshot, build_completion_record};
    use crate::domain::event::now_local;
    use crate::domain::seed::{sample_engagement, sample_events};

    async fn memory_store() -> AnalyticsStore {
        let Ok(store) = AnalyticsStore::connect("sqlite::memory:").await else {
            panic!("in-memory database should open");
        };
        store
    }

    fn seed_record() -> CompletionRecord {
        let Some(event) = sample_events(now_local()).into_iter().next() else {
            panic!("seed events missing");
        };
        let engagement = sample_engagement().remove(&1);
        let snapshot = CompletionSnapshot::build(&event, engagement.as_ref(), None);
        build_completion_record(&snapshot, engagement.as_ref(), now_local())
    }

    #[tokio::test]
    async fn capture_writes_every_table() {
        let store = memory_store().await;
        let record = seed_record();
        assert!(store.capture(&record).await.is_ok());

        let Ok(Some(row)) = store.load_event(1).await else {
            panic!("main row should exist");
        };
        assert_eq!(row.event_title, "Tech Conference 2024");
        assert_eq!(row.live_attendance, 180);
        assert_eq!(row.total_poll_responses, 77);
        assert_eq!(row.event_status, "completed");
        assert!((row.avg_attendance - 153.0).abs() < 1e-9);
        assert!((row.recommendation_rate - 69.0).abs() < 1e-9);

        let Ok(counts) = store.counts(1).await else {
            panic!("counts should load");
        };
        assert_eq!(
            counts,
            CapturedCounts {
                polls: 2,
                poll_options: 0,
                questions: 2,
                insights: 1,
                sentiments: 4,
            }
        );
    }

    #[tokio::test]
    async fn recapture_replaces_main_row_and_appends_children() {
        let store = memory_store().await;
        let record = seed_record();
        assert!(store.capture(&record).await.is_ok());
        assert!(store.capture(&record).await.is_ok());

        let Ok(counts) = store.counts(1).await else {
            panic!("counts should load");
        };
        assert_eq!(counts.polls, 4);
        assert_eq!(counts.insights, 2);
        assert!(matches!(store.load_event(1).await, Ok(Some(_))));
        assert!(matches!(store.load_event(2).await, Ok(None)));
    }

    #[tokio::test]
    async fn file_database_creates_parent_directory() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("data").join("event_analytics.db");
        let url = format!("sqlite://{}", path.display());
        let Ok(store) = AnalyticsStore::connect(&url).await else {
            panic!("file database should open");
        };
        assert!(store.capture(&seed_record()).await.is_ok());
        assert!(path.exists());

        let Ok(texts) = store.insight_texts(1).await else {
            panic!("insights should load");
        };
        assert_eq!(texts.len(), 1);
        assert!(texts.first().is_some_and(|(kind, _)| kind == "recommendation"));
    }
}

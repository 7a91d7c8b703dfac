//! Name search over response plans.
//!
//! On PostgreSQL the query blends stemmed full-text search, double-metaphone matching and
//! trigram similarity, and the database ranks the results. Other backends have none of those
//! extensions, so the lexical and trigram parts are scored here instead.

use std::cmp::Ordering;
use std::collections::HashSet;

use entity::response_plan;
use entity::sea_orm::{ConnectionTrait, DbBackend, EntityTrait, Statement};
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::Result;

// $1 is the query, $2 the text search configuration and $3 the trigram threshold.
const SEARCH_SQL: &str = r#"
SELECT response_plans.*
FROM response_plans
INNER JOIN (
    SELECT id AS search_id,
        ts_rank(to_tsvector($2::regconfig, document), plainto_tsquery($2::regconfig, $1))
        + ts_rank(to_tsvector('simple', pg_search_dmetaphone(document)), plainto_tsquery('simple', pg_search_dmetaphone($1)))
        + similarity(document, $1) AS rank
    FROM (
        SELECT id, coalesce(first_name, '') || ' ' || coalesce(last_name, '') AS document
        FROM response_plans
    ) AS documents
    WHERE to_tsvector($2::regconfig, document) @@ plainto_tsquery($2::regconfig, $1)
        OR to_tsvector('simple', pg_search_dmetaphone(document)) @@ plainto_tsquery('simple', pg_search_dmetaphone($1))
        OR similarity(document, $1) >= $3
) AS ranked ON ranked.search_id = response_plans.id
ORDER BY ranked.rank DESC, response_plans.id ASC
"#;

/// Plans whose name matches `query`, best match first.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    config: &SearchConfig,
    query: &str,
) -> Result<Vec<response_plan::Model>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let plans = match conn.get_database_backend() {
        DbBackend::Postgres => {
            response_plan::Entity::find()
                .from_raw_sql(search_statement(config, query))
                .all(conn)
                .await?
        }
        _ => {
            let candidates = response_plan::Entity::find().all(conn).await?;
            rank_in_process(candidates, config, query)
        }
    };

    debug!("Search for {:?} matched {} response plans", query, plans.len());
    Ok(plans)
}

pub fn search_statement(config: &SearchConfig, query: &str) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        SEARCH_SQL,
        [
            query.into(),
            config.dictionary.as_str().into(),
            config.trigram_threshold.into(),
        ],
    )
}

/// Rank plans by lexical match plus trigram similarity of their names.
pub fn rank_in_process(
    plans: Vec<response_plan::Model>,
    config: &SearchConfig,
    query: &str,
) -> Vec<response_plan::Model> {
    let query_words = words(query);
    let query_trigrams = trigrams(query);

    let mut scored: Vec<(f64, response_plan::Model)> = plans
        .into_iter()
        .filter_map(|plan| {
            let document = plan.name();
            let lexical = lexical_rank(&query_words, &words(&document));
            let similarity = similarity(&query_trigrams, &trigrams(&document));

            match lexical > 0.0 || similarity >= config.trigram_threshold {
                true => Some((lexical + similarity, plan)),
                false => None,
            }
        })
        .collect();

    scored.sort_by(|(a_score, a), (b_score, b)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(Ordering::Equal)
            .then(a.id.cmp(&b.id))
    });

    scored.into_iter().map(|(_, plan)| plan).collect()
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every query word has to appear in the document, like a plain text query.
fn lexical_rank(query_words: &[String], document_words: &[String]) -> f64 {
    match !query_words.is_empty() && query_words.iter().all(|word| document_words.contains(word)) {
        true => 1.0,
        false => 0.0,
    }
}

/// Trigrams the way pg_trgm extracts them: each word padded with two leading spaces and one
/// trailing space.
pub fn trigrams(text: &str) -> HashSet<String> {
    let mut set = HashSet::new();
    for word in words(text) {
        let padded: Vec<char> = format!("  {} ", word).chars().collect();
        for window in padded.windows(3) {
            set.insert(window.iter().collect());
        }
    }
    set
}

/// Shared trigrams over all distinct trigrams.
pub fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

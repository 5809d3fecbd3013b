//! Delimited-text exports
//!
//! Fields are written through `csv::Writer`, which quotes any field holding
//! the delimiter, a quote or a line break.

use crate::{
    constants::{CANDIDATE_EXPORT_HEADER, RANKING_EXPORT_HEADER},
    error::{AppError, AppResult},
    models::Profile,
    scoring::CategoryRanking,
};

/// Encode a header and rows into CSV text
pub fn encode<I, R>(header: &[&str], rows: I) -> AppResult<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV output is not UTF-8: {}", e)))
}

/// `Rank,Full Name,Competition,Evaluations,Average` for every category
pub fn rankings_csv(rankings: &[CategoryRanking]) -> AppResult<String> {
    let rows = rankings.iter().flat_map(|ranking| {
        ranking.rows.iter().map(|row| {
            vec![
                row.rank.to_string(),
                row.full_name.clone(),
                row.competition.label().to_string(),
                row.evaluation_count.to_string(),
                format!("{:.2}", row.mean),
            ]
        })
    });
    encode(RANKING_EXPORT_HEADER, rows)
}

/// One line per candidate
pub fn candidates_csv(candidates: &[Profile]) -> AppResult<String> {
    let rows = candidates.iter().map(|candidate| {
        vec![
            candidate.full_name.clone(),
            candidate.phone.clone().unwrap_or_default(),
            candidate
                .category()
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
            candidate.document_url.clone().unwrap_or_default(),
            candidate
                .videos
                .iter()
                .map(|v| v.url.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            candidate.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]
    });
    encode(CANDIDATE_EXPORT_HEADER, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, VideoEntry};
    use crate::scoring::{RankingRow, test_support::candidate};
    use uuid::Uuid;

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let csv = encode(&["a", "b"], [vec!["Ouédraogo, Awa", "say \"hi\""]]).unwrap();
        assert_eq!(csv, "a,b\n\"Ouédraogo, Awa\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_rankings_csv() {
        let rankings = vec![CategoryRanking {
            competition: Category::AgroPitch,
            rows: vec![RankingRow {
                rank: 1,
                candidate_id: Uuid::new_v4(),
                full_name: "Kaboré, Issa".to_string(),
                competition: Category::AgroPitch,
                evaluation_count: 3,
                mean: 24.333,
            }],
        }];

        let csv = rankings_csv(&rankings).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Rank,Full Name,Competition,Evaluations,Average"));
        assert_eq!(lines.next(), Some("1,\"Kaboré, Issa\",agro pitch,3,24.33"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_candidates_csv_lists_videos() {
        let mut awa = candidate("Awa", "agro_pitch");
        awa.videos = vec![
            VideoEntry {
                url: "http://f/1.mp4".into(),
                title: "un".into(),
                date: "19 oct. 2026".into(),
            },
            VideoEntry {
                url: "http://f/2.mp4".into(),
                title: "deux".into(),
                date: "19 oct. 2026".into(),
            },
        ];

        let csv = candidates_csv(&[awa]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("Awa,70000000,agro pitch,,http://f/1.mp4 http://f/2.mp4,"));
    }
}

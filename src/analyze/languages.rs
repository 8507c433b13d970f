use crate::types::activity::{LanguageProficiency, RepositorySummary};
use crate::types::scoring::to_percent;

/// Rank primary languages by their share of repositories that have one.
///
/// Repositories without a detected language are left out of the denominator.
/// Ties keep first-seen order and percentages are rounded independently, so
/// they need not sum to 100.
pub fn proficiency(repositories: &[RepositorySummary], top: usize) -> Vec<LanguageProficiency> {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for language in repositories.iter().filter_map(RepositorySummary::language) {
        match counts.iter_mut().find(|(seen, _)| *seen == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language, 1)),
        }
    }

    let with_language: u32 = counts.iter().map(|(_, count)| count).sum();
    if with_language == 0 {
        return Vec::new();
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(top)
        .map(|(language, count)| LanguageProficiency {
            language: language.to_string(),
            proficiency: to_percent(f64::from(count) / f64::from(with_language) * 100.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos(languages: &[Option<&str>]) -> Vec<RepositorySummary> {
        languages
            .iter()
            .enumerate()
            .map(|(i, language)| RepositorySummary {
                name: format!("repo-{i}"),
                primary_language: language.map(ToString::to_string),
                updated_at: None,
            })
            .collect()
    }

    fn pairs(result: &[LanguageProficiency]) -> Vec<(&str, u8)> {
        result
            .iter()
            .map(|entry| (entry.language.as_str(), entry.proficiency))
            .collect()
    }

    #[test]
    fn repositories_without_language_leave_the_denominator() {
        let mut input = vec![Some("TypeScript"); 9];
        input.push(Some("Python"));
        input.extend([None; 5]);

        let result = proficiency(&repos(&input), 5);
        assert_eq!(pairs(&result), vec![("TypeScript", 90), ("Python", 10)]);
    }

    #[test]
    fn no_languages_yields_empty_distribution() {
        assert!(proficiency(&repos(&[None, None]), 5).is_empty());
        assert!(proficiency(&[], 5).is_empty());
    }

    #[test]
    fn truncates_to_top_entries_sorted_descending() {
        let input = [
            Some("Go"),
            Some("Rust"),
            Some("Rust"),
            Some("C"),
            Some("Java"),
            Some("Ruby"),
            Some("Elixir"),
            Some("Rust"),
        ];
        let result = proficiency(&repos(&input), 5);
        assert_eq!(result.len(), 5);
        assert_eq!(result[0].language, "Rust");
        assert!(result
            .windows(2)
            .all(|pair| pair[0].proficiency >= pair[1].proficiency));
        assert!(result.iter().all(|entry| entry.proficiency <= 100));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let result = proficiency(&repos(&[Some("Go"), Some("Rust"), Some("C")]), 5);
        assert_eq!(
            pairs(&result),
            vec![("Go", 33), ("Rust", 33), ("C", 33)]
        );
    }
}

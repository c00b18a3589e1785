//! Grouping of motion text after the roll-call section heading.

use scraper::{ElementRef, Html};

use super::detector::{SectionBoundaryDetector, ROLL_CALL_SECTION_TITLE};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::html::{classes, document_text, has_tag, next_element_siblings, trimmed_text};
use crate::types::{BodyTextPart, Language, MotionData};

/// Elements of one motion-text group, the first being its opening heading.
type Group<'a> = Vec<ElementRef<'a>>;

/// Extract bilingual motion title and body text for every group label.
///
/// Groups sharing a label are expected to come in pairs, French first and
/// Dutch second. Any other count is recorded and processed best effort.
pub fn extract_motion_data<D>(
    html: &Html,
    detector: &D,
    location: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<MotionData>
where
    D: SectionBoundaryDetector + ?Sized,
{
    let starts: Vec<_> = html
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| detector.is_section_start(*el))
        .collect();

    let start = match starts.as_slice() {
        [] => {
            if document_text(html).to_lowercase().contains(ROLL_CALL_SECTION_TITLE) {
                diagnostics.note(
                    DiagnosticKind::MissingSection,
                    location,
                    "no roll-call section heading found",
                );
            }
            return Vec::new();
        }
        [start] => *start,
        _ => {
            diagnostics.note(
                DiagnosticKind::AmbiguousGrouping,
                location,
                format!("{} candidates for the roll-call section heading", starts.len()),
            );
            return Vec::new();
        }
    };

    let Some(first_title) = next_element_siblings(start).find(|el| detector.is_motion_title(*el))
    else {
        diagnostics.warn(
            DiagnosticKind::MissingSection,
            location,
            "no motion titles after the roll-call section heading",
        );
        return Vec::new();
    };

    let elements = std::iter::once(first_title).chain(next_element_siblings(first_title));
    let groups = split_into_groups(elements, detector);

    let mut by_label: Vec<(String, Vec<Group<'_>>)> = Vec::new();
    for (label, group) in groups {
        match by_label.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, same_label)) => same_label.push(group),
            None => by_label.push((label, vec![group])),
        }
    }

    by_label
        .into_iter()
        .filter_map(|(label, groups)| pair_groups(label, &groups, location, diagnostics))
        .collect()
}

/// Split elements at every group-opening heading.
///
/// Elements before the first opening heading belong to no group and are dropped.
fn split_into_groups<'a, D>(
    elements: impl Iterator<Item = ElementRef<'a>>,
    detector: &D,
) -> Vec<(String, Group<'a>)>
where
    D: SectionBoundaryDetector + ?Sized,
{
    let mut groups: Vec<(String, Group<'a>)> = Vec::new();
    for element in elements {
        if let Some(label) = detector.group_label(element) {
            groups.push((label, vec![element]));
        } else if let Some((_, current)) = groups.last_mut() {
            current.push(element);
        } else {
            tracing::trace!(tag = element.value().name(), "Skipping element before first motion group");
        }
    }
    groups
}

fn pair_groups(
    label: String,
    groups: &[Group<'_>],
    location: &str,
    diagnostics: &mut Diagnostics,
) -> Option<MotionData> {
    if groups.len() != 2 {
        diagnostics.warn(
            DiagnosticKind::AmbiguousGrouping,
            location,
            format!(
                "motion '{label}' has {} groups opened by a bordered heading, expected 2",
                groups.len()
            ),
        );
    }

    let french = groups.first()?;
    let dutch = groups.get(1).unwrap_or(french);

    let fr_title = join_titles(french);
    let nl_title = join_titles(dutch);

    let last_title = dutch.iter().rposition(|el| has_tag(*el, "h2"))?;
    let body_text_parts = dutch[last_title + 1..]
        .iter()
        .filter(|el| !trimmed_text(**el).is_empty())
        .map(|el| body_text_part(*el))
        .collect();

    Some(MotionData {
        label,
        nl_title,
        fr_title,
        body_text_parts,
    })
}

fn join_titles(group: &[ElementRef<'_>]) -> String {
    group
        .iter()
        .filter(|el| has_tag(**el, "h2"))
        .map(|el| trimmed_text(*el))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tag a body element with its language; unknown when both or neither marker class is set.
fn body_text_part(element: ElementRef<'_>) -> BodyTextPart {
    let nl = classes(element).any(|c| c == "NormalNL");
    let fr = classes(element).any(|c| c == "NormalFR");

    let lang = match (nl, fr) {
        (true, false) => Language::Nl,
        (false, true) => Language::Fr,
        _ => Language::Unknown,
    };

    BodyTextPart {
        lang,
        text: trimmed_text(element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion_data::BorderedSpanDetector;
    use pretty_assertions::assert_eq;

    const BOX: &str = "border:solid windowtext 1.0pt;padding:0cm";

    fn report(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    fn extract(html: &Html) -> (Vec<MotionData>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let data = extract_motion_data(html, &BorderedSpanDetector, "ip298x.html", &mut diagnostics);
        (data, diagnostics)
    }

    fn section() -> String {
        format!(
            r#"<h1>Naamstemmingen</h1>
<p class="NormalFR">Intro</p>
<h2><span style="{BOX}">10</span> Motions déposées</h2>
<h2>en conclusion de l'interpellation</h2>
<p class="NormalFR">Texte français</p>
<h2><span style="{BOX}">10</span> Ingediende moties</h2>
<h2>tot besluit van de interpellatie</h2>
<p class="NormalNL">Begin van de stemming.</p>
<p class="NormalFR">Début du vote.</p>
<p class="NormalNL NormalFR">(Stemming/vote 1)</p>
<p> </p>
<p>Uitslag</p>
<h2><span style="{BOX}">11</span> Projet de loi</h2>
<p class="NormalFR">Seul</p>"#
        )
    }

    #[test]
    fn test_pairs_french_and_dutch_groups() {
        let html = report(&section());
        let (data, _) = extract(&html);

        assert_eq!(data.len(), 2);
        let first = &data[0];
        assert_eq!(first.label, "10");
        assert_eq!(
            first.fr_title,
            "10 Motions déposées\nen conclusion de l'interpellation"
        );
        assert_eq!(first.nl_title, "10 Ingediende moties\ntot besluit van de interpellatie");
    }

    #[test]
    fn test_body_parts_tagged_by_language() {
        let html = report(&section());
        let (data, _) = extract(&html);

        let parts: Vec<_> = data[0]
            .body_text_parts
            .iter()
            .map(|part| (part.lang, part.text.as_str()))
            .collect();
        assert_eq!(
            parts,
            vec![
                (Language::Nl, "Begin van de stemming."),
                (Language::Fr, "Début du vote."),
                (Language::Unknown, "(Stemming/vote 1)"),
                (Language::Unknown, "Uitslag"),
            ]
        );
    }

    #[test]
    fn test_single_group_is_ambiguous_but_kept() {
        let html = report(&section());
        let (data, diagnostics) = extract(&html);

        let lonely = &data[1];
        assert_eq!(lonely.label, "11");
        assert_eq!(lonely.fr_title, lonely.nl_title);
        assert_eq!(lonely.body_text(), "Seul");
        assert_eq!(diagnostics.of_kind(DiagnosticKind::AmbiguousGrouping).count(), 1);
    }

    #[test]
    fn test_no_section_heading() {
        let html = report("<h1>Stemmingen</h1><p>Geen naamstemmingen vandaag.</p>");
        let (data, diagnostics) = extract(&html);

        assert!(data.is_empty());
        assert_eq!(diagnostics.of_kind(DiagnosticKind::MissingSection).count(), 1);
    }

    #[test]
    fn test_no_section_heading_nor_mention() {
        let html = report("<h1>Stemmingen</h1>");
        let (data, diagnostics) = extract(&html);

        assert!(data.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_multiple_section_headings() {
        let html = report(r#"<h1>Naamstemmingen</h1><p class="Titre1NL">Naamstemmingen</p>"#);
        let (data, diagnostics) = extract(&html);

        assert!(data.is_empty());
        assert_eq!(diagnostics.of_kind(DiagnosticKind::AmbiguousGrouping).count(), 1);
    }

    #[test]
    fn test_no_motion_titles() {
        let html = report("<h1>Naamstemmingen</h1><p>Niets</p>");
        let (data, diagnostics) = extract(&html);

        assert!(data.is_empty());
        assert_eq!(diagnostics.of_kind(DiagnosticKind::MissingSection).count(), 1);
    }
}

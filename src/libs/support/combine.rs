use super::NamedSet;

/// Drops every single and double quote character.
pub fn clean_name(name: &str) -> String {
    name.replace(['\'', '"'], "")
}

/// [`clean_name`] applied to every member.
pub fn clean_set(set: &NamedSet) -> NamedSet {
    set.iter().map(|s| clean_name(s)).collect()
}

/// `(Sclade ∪ Scriterion) ∩ (Soclade ∪ Scophenetic)` over cleaned names.
///
/// `target` is the criterion variable; it is removed from Scriterion after
/// cleaning, so it survives only if another set carries it.
pub fn combine(
    sclade: &NamedSet,
    scriterion: &NamedSet,
    soclade: &NamedSet,
    scophenetic: &NamedSet,
    target: &str,
) -> NamedSet {
    let mut scriterion = clean_set(scriterion);
    scriterion.remove(&clean_name(target));

    let union1: NamedSet = clean_set(sclade).union(&scriterion).cloned().collect();
    let union2: NamedSet = clean_set(soclade)
        .union(&clean_set(scophenetic))
        .cloned()
        .collect();

    union1.intersection(&union2).cloned().collect()
}

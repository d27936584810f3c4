use super::HeaderField;

/// Field count up to which insertion sort is used.
///
/// Typical requests carry few headers, where insertion sort beats a general sort.
pub(crate) const INSERTION_SORT_THRESHOLD: usize = 8;

/// Sort fields by name, byte-wise ascending.
///
/// Names are unique in a map, so stability does not matter.
pub(crate) fn sort_by_name(fields: &mut [&HeaderField]) {
    if fields.len() <= INSERTION_SORT_THRESHOLD {
        insertion_sort(fields);
    } else {
        fields.sort_unstable_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes()));
    }
}

fn insertion_sort(fields: &mut [&HeaderField]) {
    for i in 1..fields.len() {
        let mut j = i;
        while j > 0 && fields[j - 1].name().as_bytes() > fields[j].name().as_bytes() {
            fields.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::headers::matches::hash;

    fn fields(names: &[&str]) -> Vec<HeaderField> {
        names
            .iter()
            .map(|name| HeaderField::new(hash(name.as_bytes()), (*name).to_owned(), vec![]))
            .collect()
    }

    fn sorted(names: &[&str]) -> Vec<String> {
        let fields = fields(names);
        let mut refs: Vec<&HeaderField> = fields.iter().collect();
        sort_by_name(&mut refs);
        refs.iter().map(|field| field.name().to_owned()).collect()
    }

    #[test]
    fn both_paths_sort_bytewise() {
        let small = ["b", "Z", "a", "B"];
        assert!(small.len() <= INSERTION_SORT_THRESHOLD);
        assert_eq!(sorted(&small), ["B", "Z", "a", "b"]);

        let large = ["k9", "k1", "K5", "k3", "k8", "k2", "k7", "k4", "k6"];
        assert!(large.len() > INSERTION_SORT_THRESHOLD);
        assert_eq!(sorted(&large), ["K5", "k1", "k2", "k3", "k4", "k6", "k7", "k8", "k9"]);
    }

    #[quickcheck_macros::quickcheck]
    fn insertion_sort_matches_general_sort(names: Vec<String>) -> bool {
        let fields: Vec<HeaderField> = names
            .iter()
            .map(|name| HeaderField::new(hash(name.as_bytes()), name.clone(), vec![]))
            .collect();

        let mut a: Vec<&HeaderField> = fields.iter().collect();
        let mut b = a.clone();
        insertion_sort(&mut a);
        b.sort_by(|x, y| x.name().as_bytes().cmp(y.name().as_bytes()));

        a.iter().map(|f| f.name()).eq(b.iter().map(|f| f.name()))
    }
}

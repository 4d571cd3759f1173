use rand::Rng;

/// Total electron count of the neutral molecule (element index + 1 per atom).
pub fn electron_count(ati: &[usize]) -> usize {
    ati.iter().map(|&elem| elem + 1).sum()
}

/// Picks a random total charge that keeps the electron count even.
///
/// Even electron counts get -2, 0 or +2; odd counts get -1 or +1, each with
/// equal probability.
pub fn assign_random_charge<R: Rng + ?Sized>(ati: &[usize], rng: &mut R) -> i32 {
    let u: f64 = rng.gen();

    if electron_count(ati) % 2 == 0 {
        if u < 1.0 / 3.0 {
            -2
        } else if u < 2.0 / 3.0 {
            0
        } else {
            2
        }
    } else if u < 0.5 {
        -1
    } else {
        1
    }
}

//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler `evaluate` sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - alphabet = caractères acceptés par la calculatrice (0-9 . ^ x * / + - ( ) ! % a-z)
//! - budget temps global
//! - invariant clé : toute chaîne donne "Error" ou un nombre décimal simple

use std::time::{Duration, Instant};

use super::decimal::lire_nombre;
use super::evaluate;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

const ALPHABET: &str = "0123456789.^x*/+-()!%abcdefghijklmnopqrstuvwyz";

/// Morceaux « utiles » : touches de la calculatrice.
const TOUCHES: [&str; 22] = [
    "0", "1", "2", "7", "9", ".", "^", "x", "*", "/", "+", "-", "(", ")", "!", "%", "sin(",
    "cos(", "sqrt(", "log(", "ln(", "asin(",
];

fn check_resultat(expr: &str, r: &str) {
    assert!(
        r == "Error" || lire_nombre(r).is_some(),
        "résultat inattendu: expr={expr:?} r={r:?}"
    );
    // le raccourci rend la saisie telle quelle ("1e5" reste "1e5")
    if r != "Error" && r != expr {
        assert!(!r.contains(['e', 'E']), "notation exponentielle: expr={expr:?} r={r:?}");
    }
}

/// Chaîne brute sur l’alphabet complet.
fn gen_brut(rng: &mut Rng, max_len: u32) -> String {
    let chars: Vec<char> = ALPHABET.chars().collect();
    let n = rng.pick(max_len + 1);
    (0..n)
        .map(|_| chars[rng.pick(chars.len() as u32) as usize])
        .collect()
}

/// Suite de touches (plus proche d’une vraie saisie).
fn gen_touches(rng: &mut Rng, max_len: u32) -> String {
    let n = rng.pick(max_len + 1);
    (0..n)
        .map(|_| TOUCHES[rng.pick(TOUCHES.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_alphabet_brut_total() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..2000 {
        budget(t0, max);
        let expr = gen_brut(&mut rng, 16);
        let r = evaluate(&expr);
        check_resultat(&expr, &r);
    }
}

#[test]
fn fuzz_safe_touches_mix_succes_erreurs() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..2000 {
        budget(t0, max);
        let expr = gen_touches(&mut rng, 10);
        let r = evaluate(&expr);
        check_resultat(&expr, &r);
        if r == "Error" {
            seen_err += 1;
        } else {
            seen_ok += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 100, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);
    for _ in 0..200 {
        let ea = gen_touches(&mut a, 8);
        let eb = gen_touches(&mut b, 8);
        assert_eq!(ea, eb);
        assert_eq!(evaluate(&ea), evaluate(&eb), "expr={ea:?}");
    }
}

#[test]
fn fuzz_safe_cas_limites_bornes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    for expr in [
        "9^9^9",
        "99^99^99",
        "2^-99999999+1",
        "10^999999999x10^999999999",
        "3000!",
        "3001!",
        "9!!",
        "((((((((((1",
        "))))))))))",
        "----------1",
        "1.........",
        "sqrt(sqrt(sqrt(sqrt(",
    ] {
        budget(t0, max);
        let r = evaluate(expr);
        check_resultat(expr, &r);
    }
}

// src/noyau/decimal.rs
//
// Arithmétique décimale à précision fixe.
// ---------------------------------------
// - Valeur : BigDecimal (mantisse BigInt + échelle)
// - Contexte : 16 chiffres significatifs, arrondi « au pair » (decimal64)
// - + - * restent exacts ; / % ^ sont arrondis au contexte
// - fonctions : via f64, forme la plus courte gardée telle quelle
// - Rendu texte : décimal simple (jamais de notation exponentielle)
//
// L’arrondi et la division travaillent directement sur la mantisse entière
// (comme la lecture « scalée » : entier × 10^-échelle).

use std::cmp::Ordering;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::ErreurCalcul;

/// Chiffres significatifs du contexte decimal64.
pub const PRECISION_DECIMAL64: u64 = 16;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const PRECISION_MAX: u64 = 200;

const FACTORIELLE_MAX: u64 = 3000;
const LIMITE_AFFICHAGE: usize = 10_000;

/// |exposant| accepté par `puissance`.
const EXPOSANT_MAX: i64 = 999_999_999;

/// Ordre de grandeur maximal d’un résultat de `puissance` (en puissances de 10).
const ORDRE_MAX: i128 = 1_000_000_000_000_000;

/// Écart d’échelles maximal pour une addition exacte (alignement des mantisses).
const ECART_ECHELLE_MAX: u64 = 100_000;

/// Contexte d’arithmétique : précision + garde-fous.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contexte {
    /// Chiffres significatifs conservés après / % ^ et fonctions.
    pub precision: u64,
    /// Plus grand n accepté pour n!.
    pub factorielle_max: u64,
    /// Longueur maximale du texte rendu.
    pub limite_affichage: usize,
}

impl Default for Contexte {
    fn default() -> Self {
        Self::decimal64()
    }
}

impl Contexte {
    pub fn decimal64() -> Self {
        Self {
            precision: PRECISION_DECIMAL64,
            factorielle_max: FACTORIELLE_MAX,
            limite_affichage: LIMITE_AFFICHAGE,
        }
    }

    /// Même garde-fous que decimal64, précision bornée à 1..=PRECISION_MAX.
    pub fn avec_precision(precision: u64) -> Self {
        Self {
            precision: precision.clamp(1, PRECISION_MAX),
            ..Self::decimal64()
        }
    }
}

/* ------------------------ Helpers entiers ------------------------ */

fn pow10(n: u64) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Nombre de chiffres décimaux de |n| (0 compte pour 1).
fn nb_chiffres(n: &BigInt) -> u64 {
    if n.is_zero() {
        return 1;
    }
    n.magnitude().to_str_radix(10).len() as u64
}

/// Ordre de grandeur décimal : chiffres de la mantisse - échelle.
fn ordre(x: &BigDecimal) -> i128 {
    let (n, echelle) = x.as_bigint_and_exponent();
    nb_chiffres(&n) as i128 - echelle as i128
}

pub fn est_negatif(x: &BigDecimal) -> bool {
    x < &BigDecimal::zero()
}

/* ------------------------ Lecture ------------------------ */

/// Lit un littéral décimal complet ("12", "-0.5", ".5", "5.", "1e3").
///
/// None si le texte n’est pas un nombre. Les exposants démesurés sont
/// refusés (l’échelle interne est un i64).
pub fn lire_nombre(s: &str) -> Option<BigDecimal> {
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return None;
    }
    if let Some(pos) = s.find(['e', 'E']) {
        let exposant = s[pos + 1..].trim_start_matches(['+', '-']);
        if exposant.len() > 9 {
            return None;
        }
    }
    BigDecimal::from_str(s).ok()
}

/* ------------------------ Addition exacte ------------------------ */

/// a + b exact. Refuse d’aligner des échelles trop éloignées
/// (ex. 2^-99999999 + 1 demanderait une mantisse démesurée).
pub fn additionner(a: &BigDecimal, b: &BigDecimal) -> Result<BigDecimal, ErreurCalcul> {
    if a.is_zero() {
        return Ok(b.clone());
    }
    if b.is_zero() {
        return Ok(a.clone());
    }
    let (_, ea) = a.as_bigint_and_exponent();
    let (_, eb) = b.as_bigint_and_exponent();
    if ea.abs_diff(eb) > ECART_ECHELLE_MAX {
        return Err(ErreurCalcul::Depassement("échelles trop éloignées".into()));
    }
    Ok(a + b)
}

/* ------------------------ Arrondi / division ------------------------ */

/// Arrondit à `precision` chiffres significatifs, moitié au pair.
pub fn arrondir(x: &BigDecimal, precision: u64) -> BigDecimal {
    let (n, echelle) = x.as_bigint_and_exponent();
    let chiffres = nb_chiffres(&n);
    if chiffres <= precision {
        return x.clone();
    }

    let retire = chiffres - precision;
    let p = pow10(retire);
    let mut q = &n / &p;
    let r = &n % &p;

    let monter = match (r.abs() * BigInt::from(2)).cmp(&p) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => !(&q % BigInt::from(2)).is_zero(),
    };
    if monter {
        if n.is_negative() {
            q -= BigInt::one();
        } else {
            q += BigInt::one();
        }
    }

    BigDecimal::new(q, echelle - retire as i64)
}

/// a / b arrondi au contexte. Zéro exact au dénominateur => erreur.
pub fn diviser(a: &BigDecimal, b: &BigDecimal, precision: u64) -> Result<BigDecimal, ErreurCalcul> {
    if b.is_zero() {
        return Err(ErreurCalcul::DivisionParZero);
    }
    if a.is_zero() {
        return Ok(BigDecimal::zero());
    }

    let (na, ea) = a.as_bigint_and_exponent();
    let (nb, eb) = b.as_bigint_and_exponent();

    // quotient entier d’au moins precision+2 chiffres
    let decalage = (precision + 2 + nb_chiffres(&nb)).saturating_sub(nb_chiffres(&na));
    let num = na * pow10(decalage);

    let mut q = &num / &nb;
    let reste = &num % &nb;
    let mut echelle = ea - eb + decalage as i64;

    // chiffre « collant » : un reste non nul n’est jamais une moitié exacte
    if !reste.is_zero() {
        let signe = if num.is_negative() != nb.is_negative() {
            -1
        } else {
            1
        };
        q = q * BigInt::from(10) + BigInt::from(signe);
        echelle += 1;
    }

    Ok(arrondir(&BigDecimal::new(q, echelle), precision))
}

/* ------------------------ Troncature entière ------------------------ */

/// Partie entière (troncature vers zéro) si elle tient dans un i64.
pub fn vers_entier_i64(x: &BigDecimal) -> Option<i64> {
    let (n, echelle) = x.as_bigint_and_exponent();
    if echelle <= 0 {
        let zeros = echelle.unsigned_abs();
        if n.is_zero() {
            return Some(0);
        }
        if nb_chiffres(&n).saturating_add(zeros) > 19 {
            return None;
        }
        (n * pow10(zeros)).to_i64()
    } else {
        if echelle.unsigned_abs() > nb_chiffres(&n) {
            return Some(0);
        }
        (n / pow10(echelle.unsigned_abs())).to_i64()
    }
}

/* ------------------------ Puissance / factorielle ------------------------ */

/// base ^ n (n entier), arrondi au contexte.
///
/// Carré-multiplication avec précision de travail precision + len(n) + 1,
/// puis arrondi final. n négatif => inverse ; 0^négatif => division par zéro.
pub fn puissance(base: &BigDecimal, n: i64, ctx: &Contexte) -> Result<BigDecimal, ErreurCalcul> {
    if n == 0 {
        return Ok(BigDecimal::one());
    }
    if !(-EXPOSANT_MAX..=EXPOSANT_MAX).contains(&n) {
        return Err(ErreurCalcul::Depassement(format!("exposant {n}")));
    }
    if !base.is_zero() && ordre(base).abs() * n.unsigned_abs() as i128 > ORDRE_MAX {
        return Err(ErreurCalcul::Depassement("puissance démesurée".into()));
    }

    let mut e = n.unsigned_abs();
    let travail = ctx.precision + e.to_string().len() as u64 + 1;

    let mut acc = BigDecimal::one();
    let mut b = arrondir(base, travail);
    while e > 0 {
        if (e & 1) == 1 {
            acc = arrondir(&(&acc * &b), travail);
        }
        e >>= 1;
        if e > 0 {
            b = arrondir(&(&b * &b), travail);
        }
    }

    if n < 0 {
        acc = diviser(&BigDecimal::one(), &acc, travail)?;
    }
    Ok(arrondir(&acc, ctx.precision))
}

/// n! exact, n = partie entière de x.
pub fn factorielle(x: &BigDecimal, ctx: &Contexte) -> Result<BigDecimal, ErreurCalcul> {
    let Some(n) = vers_entier_i64(x) else {
        return Err(if est_negatif(x) {
            ErreurCalcul::FactorielleNegative
        } else {
            ErreurCalcul::Depassement("factorielle".into())
        });
    };
    if n < 0 {
        return Err(ErreurCalcul::FactorielleNegative);
    }
    if n as u64 > ctx.factorielle_max {
        return Err(ErreurCalcul::Depassement(format!(
            "factorielle au-delà de {}",
            ctx.factorielle_max
        )));
    }

    let mut acc = BigInt::one();
    for i in 2..=(n as u64) {
        acc *= i;
    }
    Ok(BigDecimal::new(acc, 0))
}

/* ------------------------ Pont f64 (fonctions transcendantes) ------------------------ */

/// Conversion vers f64 (hors plage => NaN, rejeté ensuite par `depuis_f64`).
pub fn vers_f64(x: &BigDecimal) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Retour en décimal depuis f64 : forme la plus courte, sans arrondi au contexte
/// (jusqu’à 17 chiffres significatifs).
/// NaN / infini => hors domaine pour `fonction`.
pub fn depuis_f64(v: f64, fonction: &str) -> Result<BigDecimal, ErreurCalcul> {
    if !v.is_finite() {
        return Err(ErreurCalcul::HorsDomaine(fonction.to_string()));
    }
    lire_nombre(&v.to_string()).ok_or_else(|| ErreurCalcul::HorsDomaine(fonction.to_string()))
}

/* ------------------------ Rendu texte ------------------------ */

/// Texte décimal simple : zéros de fin retirés, pas d’exposant.
pub fn en_texte(x: &BigDecimal, ctx: &Contexte) -> Result<String, ErreurCalcul> {
    let (n, echelle) = x.as_bigint_and_exponent();
    if n.is_zero() {
        return Ok("0".to_string());
    }

    let mut chiffres = n.magnitude().to_str_radix(10);
    let longueur = if echelle <= 0 {
        chiffres.len() as u128 + echelle.unsigned_abs() as u128
    } else {
        (chiffres.len() as u128).max(echelle.unsigned_abs() as u128 + 1) + 1
    };
    if longueur > ctx.limite_affichage as u128 {
        return Err(ErreurCalcul::Depassement("résultat trop long".into()));
    }

    let mut txt = if echelle <= 0 {
        chiffres.push_str(&"0".repeat(echelle.unsigned_abs() as usize));
        chiffres
    } else {
        let e = echelle as usize;
        if chiffres.len() <= e {
            chiffres.insert_str(0, &"0".repeat(e - chiffres.len() + 1));
        }
        let (entier, frac) = chiffres.split_at(chiffres.len() - e);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            entier.to_string()
        } else {
            format!("{entier}.{frac}")
        }
    };

    if n.is_negative() {
        txt.insert(0, '-');
    }
    Ok(txt)
}

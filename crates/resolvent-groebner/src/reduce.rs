//! Multivariate division with floating-point coefficients.

use resolvent_poly::Polynomial;

use crate::error::Result;

/// The S-polynomial of `f` and `g`.
///
/// Each operand is lifted to the lcm of the leading monomials with
/// `mon_mult` and normalized by its coefficient there, so the construction
/// is valid in any basis where `mon_mult` preserves leading terms.
///
/// # Errors
///
/// Fails if the operands differ in basis or dimension.
pub fn s_polynomial(f: &Polynomial, g: &Polynomial) -> Result<Polynomial> {
    let (Some(lt_f), Some(lt_g)) = (f.lead_term(), g.lead_term()) else {
        return Ok(Polynomial::zero(f.basis(), f.dim()));
    };
    let lcm = lt_f.lcm(lt_g);
    let (Some(qf), Some(qg)) = (lcm.div(lt_f), lcm.div(lt_g)) else {
        return Ok(Polynomial::zero(f.basis(), f.dim()));
    };

    let a = f.mon_mult(&qf)?;
    let b = g.mon_mult(&qg)?;
    let a = a.scale(1.0 / a.coeff(&lcm));
    let mut s = a.sub_scaled(&b, 1.0 / b.coeff(&lcm))?;
    s.remove_term(&lcm);
    Ok(s)
}

/// One reduction step of `p` by `divisor` at the leading term of `p`.
///
/// The leading coefficient is cancelled exactly and everything below `tol`
/// is snapped to zero.
///
/// # Errors
///
/// Fails if the operands differ in basis or dimension.
pub fn reduce_lead(p: &Polynomial, divisor: &Polynomial, tol: f64) -> Result<Polynomial> {
    let (Some(lt), Some(lt_div)) = (p.lead_term(), divisor.lead_term()) else {
        return Ok(p.clone());
    };
    let Some(quotient) = lt.div(lt_div) else {
        return Ok(p.clone());
    };
    let lt = lt.clone();
    let shifted = divisor.mon_mult(&quotient)?;
    let factor = p.lead_coeff() / shifted.coeff(&lt);
    let mut out = p.sub_scaled(&shifted, factor)?;
    out.remove_term(&lt);
    out.snap_zeros(tol);
    Ok(out)
}

/// Full normal form of `p` with respect to `divisors`.
///
/// Leading terms divisible by some divisor's leading monomial are reduced
/// by the first such divisor; all others move to the remainder.
///
/// # Errors
///
/// Fails if the operands differ in basis or dimension.
pub fn normal_form(p: &Polynomial, divisors: &[Polynomial], tol: f64) -> Result<Polynomial> {
    let mut current = p.clone();
    current.snap_zeros(tol);
    let mut remainder = Vec::new();

    while let Some(lt) = current.lead_term().cloned() {
        let divisor = divisors
            .iter()
            .find(|d| d.lead_term().is_some_and(|l| lt.is_divisible_by(l)));
        match divisor {
            Some(d) => current = reduce_lead(&current, d, tol)?,
            None => {
                let c = current.remove_term(&lt);
                remainder.push((lt, c));
            }
        }
    }

    Ok(Polynomial::from_terms(p.basis(), p.dim(), remainder)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolvent_poly::{Basis, Monomial};

    fn poly(terms: &[(&[u32], f64)]) -> Polynomial {
        Polynomial::from_terms(
            Basis::Power,
            2,
            terms.iter().map(|&(e, c)| (Monomial::new(e), c)),
        )
        .unwrap()
    }

    #[test]
    fn test_s_polynomial() {
        // S(x^2 + y^2 - 5, x - y + 1) = y^2 + x*y - x - 5
        let f = poly(&[(&[2, 0], 1.0), (&[0, 2], 1.0), (&[0, 0], -5.0)]);
        let g = poly(&[(&[1, 0], 1.0), (&[0, 1], -1.0), (&[0, 0], 1.0)]);
        let s = s_polynomial(&f, &g).unwrap();
        assert_eq!(s.coeff(&Monomial::new(&[2, 0])), 0.0);
        assert_eq!(s.coeff(&Monomial::new(&[1, 1])), 1.0);
        assert_eq!(s.coeff(&Monomial::new(&[0, 2])), 1.0);
        assert_eq!(s.coeff(&Monomial::new(&[1, 0])), -1.0);
    }

    #[test]
    fn test_normal_form() {
        // x*y + y^2 - x - 5 mod (x - y + 1) = 2y^2 - 2y - 4
        let p = poly(&[(&[1, 1], 1.0), (&[0, 2], 1.0), (&[1, 0], -1.0), (&[0, 0], -5.0)]);
        let g = poly(&[(&[1, 0], 1.0), (&[0, 1], -1.0), (&[0, 0], 1.0)]);
        let r = normal_form(&p, &[g], 1e-12).unwrap();
        assert_eq!(r.lead_term(), Some(&Monomial::new(&[0, 2])));
        assert!((r.coeff(&Monomial::new(&[0, 2])) - 2.0).abs() < 1e-12);
        assert!((r.coeff(&Monomial::new(&[0, 1])) + 2.0).abs() < 1e-12);
        assert!((r.coeff(&Monomial::new(&[0, 0])) + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_normal_form_of_multiple_is_zero() {
        let g = poly(&[(&[1, 0], 1.0), (&[0, 0], -2.0)]);
        let p = g.mon_mult(&Monomial::new(&[1, 1])).unwrap();
        assert!(normal_form(&p, &[g], 1e-12).unwrap().is_zero());
    }
}

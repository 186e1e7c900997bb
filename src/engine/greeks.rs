//! Black-Scholes leg sensitivities.
//!
//! Conventions follow the screener feeds: rate and implied volatility are
//! percentages, time is calendar days to expiry, theta is per calendar
//! day, vega is per 1% IV move. No dividend yield.

use libm::erf;

const SQRT_2: f64 = std::f64::consts::SQRT_2;
const INV_SQRT_TWO_PI: f64 = 0.398_942_280_401_432_7;
const DAYS_PER_YEAR: f64 = 365.0;

/// Sensitivities of a single option leg.
#[derive(Debug, Clone, Copy)]
pub struct LegGreeks {
    pub delta: f64,
    pub gamma: f64,
    /// Per calendar day.
    pub theta: f64,
    /// Per 1% IV change.
    pub vega: f64,
}

/// Put-leg greeks, or None when the inputs cannot price (expired leg,
/// missing/zero IV, bad spot or strike).
pub fn put_greeks(spot: f64, strike: f64, rate_pct: f64, days: f64, iv_pct: f64) -> Option<LegGreeks> {
    let p = Params::new(spot, strike, rate_pct, days, iv_pct)?;
    let theta = (-spot * norm_pdf(p.d1) * p.sigma / (2.0 * p.sqrt_t)
        + p.r * strike * p.disc * norm_cdf(-p.d2))
        / DAYS_PER_YEAR;
    Some(LegGreeks {
        delta: norm_cdf(p.d1) - 1.0,
        gamma: p.gamma(spot),
        theta,
        vega: p.vega(spot),
    })
}

/// Call-leg greeks, same conventions and failure modes as [`put_greeks`].
pub fn call_greeks(
    spot: f64,
    strike: f64,
    rate_pct: f64,
    days: f64,
    iv_pct: f64,
) -> Option<LegGreeks> {
    let p = Params::new(spot, strike, rate_pct, days, iv_pct)?;
    let theta = (-spot * norm_pdf(p.d1) * p.sigma / (2.0 * p.sqrt_t)
        - p.r * strike * p.disc * norm_cdf(p.d2))
        / DAYS_PER_YEAR;
    Some(LegGreeks {
        delta: norm_cdf(p.d1),
        gamma: p.gamma(spot),
        theta,
        vega: p.vega(spot),
    })
}

struct Params {
    r: f64,
    sigma: f64,
    sqrt_t: f64,
    disc: f64,
    d1: f64,
    d2: f64,
}

impl Params {
    fn new(spot: f64, strike: f64, rate_pct: f64, days: f64, iv_pct: f64) -> Option<Self> {
        if !(spot > 0.0 && strike > 0.0 && days > 0.0 && iv_pct > 0.0) {
            return None;
        }
        if !(spot.is_finite() && strike.is_finite() && rate_pct.is_finite() && days.is_finite()) {
            return None;
        }
        let t = days / DAYS_PER_YEAR;
        let r = rate_pct / 100.0;
        let sigma = iv_pct / 100.0;
        let sqrt_t = t.sqrt();
        let denom = sigma * sqrt_t;
        if denom <= 0.0 || !denom.is_finite() {
            return None;
        }
        let d1 = ((spot / strike).ln() + (r + 0.5 * sigma * sigma) * t) / denom;
        if !d1.is_finite() {
            return None;
        }
        Some(Self {
            r,
            sigma,
            sqrt_t,
            disc: (-r * t).exp(),
            d1,
            d2: d1 - denom,
        })
    }

    fn gamma(&self, spot: f64) -> f64 {
        norm_pdf(self.d1) / (spot * self.sigma * self.sqrt_t)
    }

    fn vega(&self, spot: f64) -> f64 {
        spot * norm_pdf(self.d1) * self.sqrt_t / 100.0
    }
}

fn norm_pdf(x: f64) -> f64 {
    INV_SQRT_TWO_PI * (-0.5 * x * x).exp()
}

fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

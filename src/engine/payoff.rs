use chrono::NaiveDate;

use crate::model::{CollarCandidate, NetGreeks, OptionQuote, Payoff, UnderlyingSnapshot};

use super::greeks::{call_greeks, put_greeks};

/// Inputs shared by every greeks computation in a run.
#[derive(Debug, Clone, Copy)]
pub struct GreeksContext {
    pub as_of: NaiveDate,
    /// Annualized risk-free rate, percent.
    pub rate_pct: f64,
}

/// Width of the collar relative to the premium paid for it. The sign-split
/// piecewise definition collapses to `diff - premium` in every branch with
/// a nonzero diff (zero premium included); a symmetric collar (diff == 0)
/// keeps risk at zero regardless of premium. A test pins the equivalence.
pub fn risk_pct(diff_pct: f64, net_premium_pct: f64) -> f64 {
    if diff_pct == 0.0 {
        diff_pct
    } else {
        diff_pct - net_premium_pct
    }
}

/// Relative bid/ask spread of one leg: (ask - bid) / last. Absent when
/// either side of the book is missing or the leg has never traded
/// (last == 0 would divide by zero).
pub fn leg_spread(quote: &OptionQuote) -> Option<f64> {
    let bid = quote.bid?;
    let ask = quote.ask?;
    if quote.last == 0.0 {
        return None;
    }
    let spread = (ask - bid) / quote.last;
    spread.is_finite().then_some(spread)
}

/// Build the full metric set for one bracketing (put, call) pair.
///
/// Returns None when a primary metric (net premium, max loss, max profit)
/// comes out non-finite — such a pairing is dropped, never propagated as
/// NaN. Secondary metrics degrade to absent individually.
pub fn compute(
    underlying: &UnderlyingSnapshot,
    put: &OptionQuote,
    call: &OptionQuote,
    greeks_ctx: Option<&GreeksContext>,
) -> Option<CollarCandidate> {
    let spot = underlying.current_price;
    debug_assert!(put.strike < spot && spot < call.strike);

    let net_premium = put.last - call.last;
    let net_premium_pct = net_premium / spot * 100.0;
    let max_loss_pct = ((spot - put.strike) + net_premium) / spot * 100.0;
    let max_profit_pct = ((call.strike - spot) - net_premium) / spot * 100.0;
    let move_put_pct = (spot - put.strike) / spot * 100.0;
    let move_call_pct = (call.strike - spot) / spot * 100.0;
    let diff_pct = move_call_pct - move_put_pct;

    let primary = [net_premium_pct, max_loss_pct, max_profit_pct, diff_pct];
    if primary.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let liquidity = match (put.open_interest, call.open_interest) {
        (Some(a), Some(b)) => Some(a + b),
        _ => None,
    };
    let iv_diff = match (call.implied_volatility, put.implied_volatility) {
        (Some(c), Some(p)) => Some(c - p),
        _ => None,
    };
    let avg_spread = match (leg_spread(put), leg_spread(call)) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        _ => None,
    };
    let strike_distance = match (underlying.support_strike, underlying.resistance_strike) {
        (Some(support), Some(resistance)) => {
            Some((put.strike - support).abs() + (call.strike - resistance).abs())
        }
        _ => None,
    };

    let greeks = greeks_ctx.and_then(|ctx| net_greeks(spot, put, call, ctx));

    Some(CollarCandidate {
        symbol: underlying.symbol.clone(),
        underlying_price: spot,
        put: put.clone(),
        call: call.clone(),
        payoff: Payoff {
            net_premium,
            net_premium_pct,
            max_loss_pct,
            max_profit_pct,
            move_put_pct,
            move_call_pct,
            diff_pct,
            risk_pct: risk_pct(diff_pct, net_premium_pct),
            liquidity,
            iv_diff,
            avg_spread,
            strike_distance,
            greeks,
        },
    })
}

/// Net collar sensitivities: each leg priced with its own IV and its own
/// days to expiry. Gamma and vega are strike-symmetric per leg, so the
/// put leg's values stand for the pair.
fn net_greeks(
    spot: f64,
    put: &OptionQuote,
    call: &OptionQuote,
    ctx: &GreeksContext,
) -> Option<NetGreeks> {
    let put_days = days_to_expiry(put.expiry?, ctx.as_of)?;
    let call_days = days_to_expiry(call.expiry?, ctx.as_of)?;
    let put_leg = put_greeks(spot, put.strike, ctx.rate_pct, put_days, put.implied_volatility?)?;
    let call_leg = call_greeks(
        spot,
        call.strike,
        ctx.rate_pct,
        call_days,
        call.implied_volatility?,
    )?;
    Some(NetGreeks {
        net_delta_abs: (put_leg.delta - call_leg.delta).abs(),
        net_gamma: put_leg.gamma,
        net_theta: put_leg.theta - call_leg.theta,
        net_vega: put_leg.vega,
    })
}

/// Calendar days until expiry; None unless strictly in the future.
pub fn days_to_expiry(expiry: NaiveDate, as_of: NaiveDate) -> Option<f64> {
    let days = (expiry - as_of).num_days();
    (days > 0).then_some(days as f64)
}

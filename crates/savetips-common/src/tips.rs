use crate::random::RandomSource;

pub const INVALID_BUDGET_TIP: &str = "Please provide a valid monthly budget greater than 0.";

pub const HIGH_SPENDING_TIP: &str =
    "Your spending is high. Consider tracking your expenses daily and tightening your budget.";
pub const GOOD_SAVINGS_TIP: &str =
    "Great job on savings! Keep monitoring your spending to maintain this trend.";

pub const OVER_BUDGET_SHARE_TIP: &str =
    "You're spending over 80% of your budget. Check for non-essential expenses.";
pub const GROCERY_PLAN_TIP: &str = "Plan your grocery list in advance to maximize your savings.";

pub const STORE_FLYERS_TIP: &str = "Check local store flyers for discount offers this week.";
pub const DIGITAL_COUPONS_TIP: &str = "Use digital coupons or loyalty apps to save even more.";

/// Below this savings rate the spending is considered high.
const LOW_SAVINGS_RATE: f64 = 0.2;

/// Share of the budget above which the overspend tip is given.
const HIGH_SPEND_SHARE: f64 = 0.8;

/// Fraction of the budget not yet spent.
pub fn savings_rate(monthly_budget: f64, current_spent: f64) -> f64 {
    1.0 - current_spent / monthly_budget
}

/// Build the tips for a budget and the amount spent so far.
///
/// A non-positive budget yields only [`INVALID_BUDGET_TIP`]. Otherwise the
/// result is always three tips, in order: savings rate, budget share, and a
/// promotional tip picked by `random`.
pub fn generate_tips(
    monthly_budget: f64,
    current_spent: f64,
    random: &dyn RandomSource,
) -> Vec<String> {
    if monthly_budget <= 0.0 {
        return vec![INVALID_BUDGET_TIP.to_string()];
    }

    let mut tips = Vec::with_capacity(3);

    if savings_rate(monthly_budget, current_spent) < LOW_SAVINGS_RATE {
        tips.push(HIGH_SPENDING_TIP);
    } else {
        tips.push(GOOD_SAVINGS_TIP);
    }

    if current_spent > monthly_budget * HIGH_SPEND_SHARE {
        tips.push(OVER_BUDGET_SHARE_TIP);
    } else {
        tips.push(GROCERY_PLAN_TIP);
    }

    if random.next_bool() {
        tips.push(STORE_FLYERS_TIP);
    } else {
        tips.push(DIGITAL_COUPONS_TIP);
    }

    tips.into_iter().map(str::to_string).collect()
}

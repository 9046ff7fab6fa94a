//! Club finances: weekly wages, gate receipts and prize money

use chrono::{Datelike, NaiveDate};
use rand::Rng;

use crate::config::{CalendarRules, LeagueRules};
use crate::models::{Club, NewsCategory, Player, Staff};
use crate::season::GameState;

/// Weekly pay of a staff member
pub fn staff_wage(staff: &Staff) -> i64 {
    1_000 + staff.quality as i64 * 400
}

/// Players' and staff wages for one week
pub fn weekly_wage_bill(club: &Club, squad: &[&Player]) -> i64 {
    let players: i64 = squad.iter().map(|p| p.contract.weekly_wage).sum();
    let staff: i64 = club.staff.iter().map(staff_wage).sum();
    players + staff
}

pub fn is_wage_day(date: NaiveDate, calendar: &CalendarRules) -> bool {
    date.weekday() == calendar.wage_day
}

/// Ticket income of the home club for one match
pub fn gate_receipts(home: &Club, away: &Club, rng: &mut impl Rng) -> i64 {
    let base = home.reputation as f64 * 1_500.0 + away.reputation as f64 * 500.0;
    (base * rng.gen_range(0.9..=1.1)).round() as i64
}

/// Prize for finishing at 1-based `position` of `division`; lower divisions pay less.
pub fn prize_money(position: usize, division: u8, rules: &LeagueRules) -> i64 {
    let place = position.saturating_sub(1) as i64;
    (rules.first_place_prize - place * rules.prize_step).max(0) / (division as i64 + 1)
}

/// Debit every club's weekly wage bill. Clubs may go into debt.
pub fn pay_weekly_wages(state: &mut GameState) {
    let bills: Vec<i64> = state
        .clubs
        .iter()
        .map(|club| weekly_wage_bill(club, &state.squad(club.id)))
        .collect();

    let mut insolvent = Vec::new();
    for (club, bill) in state.clubs.iter_mut().zip(bills) {
        let was_solvent = club.balance >= 0;
        club.balance -= bill;
        let balance = club.balance;
        log::debug!("{} paid {bill} in wages, balance {balance}", club.name);
        if was_solvent && balance < 0 {
            let headline = format!("{} can no longer cover its wage bill", club.name);
            insolvent.push((club.id, headline));
        }
    }
    for (club, headline) in insolvent {
        state.post_news(NewsCategory::Finance, headline, vec![club]);
    }
}

use cashflow_scheduler::model::plan::{Bill, Deposit, HORIZON_DAYS, Plan};

/// The canonical S1 scenario, matching the embedded plan in the reference
/// implementation's `api/_shared.py::_embedded_plan` line for line (bill
/// names, days, and amounts). Bills total 382_247 cents: with deposits of
/// 204_200 and a start balance of 9_050, `base[30] = -168_997`, so the only
/// workday count landing the final closing in `[46550, 51550]` is 22
/// (`-168_997 + 22*10_000 = 51_003`).
pub fn s1_plan() -> Plan {
    Plan {
        start_balance_cents: 9_050,
        target_end_cents: 49_050,
        band_cents: 2_500,
        rent_guard_cents: 163_600,
        deposits: vec![
            Deposit { day: 11, amount_cents: 102_100 },
            Deposit { day: 25, amount_cents: 102_100 },
        ],
        bills: vec![
            Bill { day: 1, name: "Auto Insurance".into(), amount_cents: 17_700 },
            Bill { day: 2, name: "YouTube Premium".into(), amount_cents: 800 },
            Bill { day: 5, name: "Groceries".into(), amount_cents: 11_250 },
            Bill { day: 5, name: "Weed".into(), amount_cents: 2_000 },
            Bill { day: 8, name: "Paramount Plus".into(), amount_cents: 1_200 },
            Bill { day: 8, name: "iPad AppleCare".into(), amount_cents: 849 },
            Bill { day: 10, name: "Streaming Svcs".into(), amount_cents: 23_000 },
            Bill { day: 11, name: "Cat Food".into(), amount_cents: 4_000 },
            Bill { day: 12, name: "Groceries".into(), amount_cents: 11_250 },
            Bill { day: 12, name: "Weed".into(), amount_cents: 2_000 },
            Bill { day: 14, name: "iPad AppleCare".into(), amount_cents: 849 },
            Bill { day: 16, name: "Cat Food".into(), amount_cents: 4_000 },
            Bill { day: 17, name: "Car Payment".into(), amount_cents: 46_300 },
            Bill { day: 19, name: "Groceries".into(), amount_cents: 11_250 },
            Bill { day: 19, name: "Weed".into(), amount_cents: 2_000 },
            Bill { day: 22, name: "Cell Phone".into(), amount_cents: 17_700 },
            Bill { day: 23, name: "Cat Food".into(), amount_cents: 4_000 },
            Bill { day: 24, name: "AI Subscription".into(), amount_cents: 22_000 },
            Bill { day: 25, name: "Electric".into(), amount_cents: 13_900 },
            Bill { day: 25, name: "Ring Subscription".into(), amount_cents: 1_000 },
            Bill { day: 26, name: "Groceries".into(), amount_cents: 11_250 },
            Bill { day: 26, name: "Weed".into(), amount_cents: 2_000 },
            Bill { day: 28, name: "iPhone AppleCare".into(), amount_cents: 1_349 },
            Bill { day: 29, name: "Internet".into(), amount_cents: 3_000 },
            Bill { day: 29, name: "Cat Food".into(), amount_cents: 4_000 },
            Bill { day: 30, name: "Rent".into(), amount_cents: 163_600 },
        ],
        manual_adjustments: vec![],
        actions: vec![None; HORIZON_DAYS],
        locks: vec![],
        metadata: Default::default(),
    }
}

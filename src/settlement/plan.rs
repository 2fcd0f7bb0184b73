use crate::balance::sheet::GroupBalances;
use crate::core::member::MemberName;
use crate::settlement::planner::SETTLEMENT_EPSILON;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single proposed payment from one member to another.
///
/// The amount is positive and rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// The member who pays.
    pub from: MemberName,
    /// The member who receives.
    pub to: MemberName,
    /// How much changes hands.
    pub amount: Decimal,
}

/// An ordered list of settlements that zeroes out a group's balances.
///
/// Plans are ephemeral derivations: recompute after any expense change
/// rather than editing a stored plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    settlements: Vec<Settlement>,
}

impl SettlementPlan {
    pub(crate) fn new(settlements: Vec<Settlement>) -> Self {
        Self { settlements }
    }

    /// The proposed payments, in planning order.
    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    /// Number of payments in the plan.
    pub fn transfer_count(&self) -> usize {
        self.settlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Total amount moved by the plan.
    pub fn total_transferred(&self) -> Decimal {
        self.settlements.iter().map(|s| s.amount).sum()
    }

    /// The balances left after applying every settlement.
    ///
    /// A payment moves the payer's balance up toward zero and the
    /// receiver's balance down toward zero.
    pub fn residual_after(&self, balances: &GroupBalances) -> GroupBalances {
        let mut remaining = balances.clone();
        for settlement in &self.settlements {
            remaining.credit(&settlement.from, settlement.amount);
            remaining.debit(&settlement.to, settlement.amount);
        }
        remaining
    }

    /// Verify the plan against the balances it was built from: applying
    /// every payment must leave each member within one cent of zero.
    pub fn settles(&self, balances: &GroupBalances) -> bool {
        self.residual_after(balances).is_settled(SETTLEMENT_EPSILON)
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        if self.settlements.is_empty() {
            writeln!(f, "All settled up. No payments needed.")?;
            return Ok(());
        }
        for settlement in &self.settlements {
            writeln!(
                f,
                "{} pays {} → {}",
                settlement.from, settlement.amount, settlement.to
            )?;
        }
        writeln!(f, "Transfers: {}", self.transfer_count())?;
        writeln!(f, "Total:     {}", self.total_transferred())?;
        Ok(())
    }
}

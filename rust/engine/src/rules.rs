use crate::errors::ActionError;
use crate::player::PlayerAction as A;

/// A requested action resolved against the acting seat's chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    /// Chips needed to match the highest contribution (0 is a check)
    Call(u32),
    /// New contribution target and the chips it takes to reach it
    Raise { to: u32, add: u32 },
    /// The whole remaining stack
    AllIn(u32),
}

impl ValidatedAction {
    /// Chips this action moves into the pot.
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold => 0,
            ValidatedAction::Call(n) | ValidatedAction::AllIn(n) => n,
            ValidatedAction::Raise { add, .. } => add,
        }
    }
}

/// Validates a player action against the seat's stack and contribution.
///
/// # Arguments
///
/// * `stack` - Chips the seat still holds
/// * `contributed` - Chips the seat already put in this hand
/// * `highest` - Highest contribution of any seat this hand
/// * `action` - What the seat asked for
///
/// A call or raise the stack cannot cover becomes [`ValidatedAction::AllIn`].
///
/// # Errors
///
/// [`ActionError::RaiseTooSmall`] when a raise target does not exceed
/// `highest`. The engine treats this as recoverable and asks again.
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, ValidatedAction};
/// use holdem_engine::player::PlayerAction;
///
/// // Facing a 100 bet with 50 already in
/// let v = validate_action(1000, 50, 100, PlayerAction::Call);
/// assert_eq!(v, Ok(ValidatedAction::Call(50)));
///
/// // Not enough behind to reach the target
/// let v = validate_action(120, 50, 100, PlayerAction::RaiseTo(300));
/// assert_eq!(v, Ok(ValidatedAction::AllIn(120)));
/// ```
pub fn validate_action(
    stack: u32,
    contributed: u32,
    highest: u32,
    action: A,
) -> Result<ValidatedAction, ActionError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Call => {
            let to_call = highest.saturating_sub(contributed);
            if to_call >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::RaiseTo(target) => {
            if target <= highest {
                return Err(ActionError::RaiseTooSmall {
                    target,
                    minimum: highest.saturating_add(1),
                });
            }
            let add = target - contributed;
            if add >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Raise { to: target, add })
            }
        }
    }
}

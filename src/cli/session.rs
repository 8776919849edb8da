use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::debug;
use crate::account::{Account, AccountStore, Registration, StoreError};
use crate::config::RegistrationConfig;
use crate::error::AtmError;
use super::console::Console;
use super::menu::{self, Command, EntryChoice};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
    Terminated,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// User chose Exit from the menu
    Exited,
    /// First choice was neither login nor register
    WrongOption,
    /// Login or registration was refused
    Rejected(StoreError),
}

/// Login/registration failures are printed; faults propagate.
enum StartError {
    Rejected(StoreError),
    Fault(AtmError),
}

impl From<StoreError> for StartError {
    fn from(err: StoreError) -> Self {
        StartError::Rejected(err)
    }
}

impl From<AtmError> for StartError {
    fn from(err: AtmError) -> Self {
        StartError::Fault(err)
    }
}

/// Single-session ATM controller
pub struct Atm<R, W> {
    store: AccountStore,
    console: Console<R, W>,
    registration: RegistrationConfig,
    state: SessionState,
}

impl<R: BufRead, W: Write> Atm<R, W> {
    pub fn new(store: AccountStore, console: Console<R, W>, registration: RegistrationConfig) -> Self {
        Self {
            store,
            console,
            registration,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn into_parts(self) -> (AccountStore, Console<R, W>) {
        (self.store, self.console)
    }

    /// Authenticate or register once, then serve menu commands until Exit.
    ///
    /// Refused logins and registrations end the run with `Ok`; only I/O
    /// faults and malformed numbers come back as `Err`.
    pub fn run(&mut self) -> Result<SessionEnd, AtmError> {
        let Self { store, console, registration, state } = self;

        console.say_all(menu::ENTRY_SCREEN)?;
        let choice = console.prompt_int(menu::ENTRY_PROMPT)?;

        let started = match EntryChoice::from_number(choice) {
            Some(EntryChoice::Login) => login(store, console),
            Some(EntryChoice::Register) => register(store, console, registration),
            None => {
                console.say(menu::WRONG_OPTION)?;
                transition(state, SessionState::Terminated);
                return Ok(SessionEnd::WrongOption);
            }
        };

        let account = match started {
            Ok(account) => account,
            Err(StartError::Rejected(err)) => {
                console.say(err)?;
                transition(state, SessionState::Terminated);
                return Ok(SessionEnd::Rejected(err));
            }
            Err(StartError::Fault(err)) => {
                transition(state, SessionState::Terminated);
                return Err(err);
            }
        };
        transition(state, SessionState::Authenticated);

        console.blank_line()?;
        console.say(menu::greeting(account.display_name()))?;

        let served = command_loop(account, console);
        transition(state, SessionState::Terminated);
        served.map(|_| SessionEnd::Exited)
    }
}

fn transition(state: &mut SessionState, next: SessionState) {
    debug!(from = ?*state, to = ?next, "session transition");
    *state = next;
}

fn login<'a, R: BufRead, W: Write>(
    store: &'a mut AccountStore,
    console: &mut Console<R, W>,
) -> Result<&'a mut Account, StartError> {
    let username = console.prompt("Username: ")?;
    let key = store.find(&username)?;

    let pin = console.prompt_int("PIN: ")?;
    Ok(store.login(&key, pin)?)
}

fn register<'a, R: BufRead, W: Write>(
    store: &'a mut AccountStore,
    console: &mut Console<R, W>,
    config: &RegistrationConfig,
) -> Result<&'a mut Account, StartError> {
    let username = console.prompt("Pick username: ")?;
    let key = store.ensure_available(&username)?;

    let display_name = console.prompt("Full name: ")?;
    let pin = console.prompt_int("Set 4-digit PIN: ")?;
    let initial_deposit = console.prompt_amount("Initial deposit Rs.: ")?;

    let account = store.register(
        Registration {
            username: key,
            display_name,
            pin,
            initial_deposit,
        },
        config.enforce_pin_range,
    )?;
    console.say(menu::REGISTERED)?;
    Ok(account)
}

fn command_loop<R: BufRead, W: Write>(
    account: &mut Account,
    console: &mut Console<R, W>,
) -> Result<(), AtmError> {
    loop {
        console.say_all(menu::MENU)?;
        let choice = console.prompt_int(menu::MENU_PROMPT)?;

        let flow = match Command::from_number(choice) {
            Some(command) => dispatch(command, account, console)?,
            None => {
                console.say(menu::INVALID_CHOICE)?;
                ControlFlow::Continue(())
            }
        };
        console.blank_line()?;

        if flow.is_break() {
            return Ok(());
        }
    }
}

fn dispatch<R: BufRead, W: Write>(
    command: Command,
    account: &mut Account,
    console: &mut Console<R, W>,
) -> Result<ControlFlow<()>, AtmError> {
    debug!(?command, "dispatching");
    match command {
        Command::CheckBalance => {
            console.say(menu::balance_line(account.check_balance()))?;
        }
        Command::Deposit => {
            let amount = console.prompt_amount("Deposit Rs.: ")?;
            match account.deposit(amount) {
                Ok(receipt) => console.say(menu::deposited(receipt.amount))?,
                Err(err) => console.say(err)?,
            }
        }
        Command::Withdraw => {
            let amount = console.prompt_amount("Withdraw Rs.: ")?;
            match account.withdraw(amount) {
                Ok(receipt) => console.say(menu::withdrawn(receipt.amount))?,
                Err(err) => console.say(err)?,
            }
        }
        Command::ChangePin => {
            let old_pin = console.prompt_int("Old PIN: ")?;
            let new_pin = console.prompt_int("New 4-digit PIN: ")?;
            match account.change_pin(old_pin, new_pin) {
                Ok(()) => console.say(menu::PIN_CHANGED)?,
                Err(err) => console.say(err)?,
            }
        }
        Command::Exit => {
            console.say(menu::FAREWELL)?;
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::account::PinError;
    use crate::config::AtmConfig;

    type TestAtm = Atm<Cursor<Vec<u8>>, Vec<u8>>;

    fn atm_with(script: &str, registration: RegistrationConfig) -> TestAtm {
        let store = AccountStore::seeded(&AtmConfig::default().seed_accounts);
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        Atm::new(store, console, registration)
    }

    fn new_atm(script: &str) -> TestAtm {
        atm_with(script, RegistrationConfig::default())
    }

    fn finish(atm: TestAtm) -> (AccountStore, String) {
        let (store, console) = atm.into_parts();
        let (_, output) = console.into_inner();
        (store, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_full_transcript() {
        let mut atm = new_atm("1\njones\n1234\n1\n5\n");
        assert_eq!(atm.run().unwrap(), SessionEnd::Exited);
        assert_eq!(atm.state(), SessionState::Terminated);

        let menu = "=== MENU ===\n1. Check Balance\n2. Deposit\n3. Withdraw\n4. Change PIN\n5. Exit\nChoice: ";
        let expected = format!(
            "===== ATM =====\n1. Login\n2. Register\nChoose: Username: PIN: \nHey Jones!\n\
             {menu}Balance: Rs. 5000.00\n\n\
             {menu}Thank you for using! Visit again!\n\n"
        );
        let (_, output) = finish(atm);
        assert_eq!(output, expected);
    }

    #[test]
    fn test_deposit_then_rejected_withdrawals() {
        let mut atm = new_atm("1\nJones\n1234\n2\n500\n3\n6000\n3\n-50\n1\n5\n");
        assert_eq!(atm.run().unwrap(), SessionEnd::Exited);

        let (store, output) = finish(atm);
        assert!(output.contains("Deposited Rs. 500.00 :)\n"));
        assert!(output.contains("Bro, not enough balance\n"));
        assert!(output.contains("Invalid withdrawal\n"));
        assert!(output.contains("Balance: Rs. 5500.00\n"));
        assert_eq!(store.get("jones").unwrap().check_balance(), 5500.0);
    }

    #[test]
    fn test_withdraw_and_invalid_deposit() {
        let mut atm = new_atm("1\ntom\n5678\n3\n999.5\n2\n0\n7\n5\n");
        atm.run().unwrap();

        let (store, output) = finish(atm);
        assert!(output.contains("Withdrawn Rs. 999.50, done!\n"));
        assert!(output.contains("Nah, invalid deposit\n"));
        assert!(output.contains("Nope, try again\n"));
        assert_eq!(store.get("tom").unwrap().check_balance(), 7000.5);
    }

    #[test]
    fn test_deposit_message_rounds_half_up() {
        let mut atm = new_atm("1\njones\n1234\n2\n0.125\n5\n");
        atm.run().unwrap();

        let (_, output) = finish(atm);
        assert!(output.contains("Deposited Rs. 0.13 :)\n"));
    }

    #[test]
    fn test_change_pin() {
        let mut atm = new_atm("1\njones\n1234\n4\n1234\n42\n4\n1111\n2222\n4\n1234\n2222\n5\n");
        atm.run().unwrap();

        let (store, output) = finish(atm);
        assert!(output.contains("Pin gotta be 4 digits, dude\n"));
        assert!(output.contains("Old pin wrong, try again\n"));
        assert_eq!(output.matches("Pin changed successfully!").count(), 1);
        assert!(store.get("jones").unwrap().authenticate(2222));
    }

    #[test]
    fn test_login_failures() {
        let mut atm = new_atm("1\nnobody\n");
        assert_eq!(atm.run().unwrap(), SessionEnd::Rejected(StoreError::AccountNotFound));
        assert_eq!(atm.state(), SessionState::Terminated);
        let (_, output) = finish(atm);
        assert!(output.ends_with("Username: No user detected with that name\n"));

        let mut atm = new_atm("1\nalex\n1234\n");
        assert_eq!(atm.run().unwrap(), SessionEnd::Rejected(StoreError::PinIncorrect));
        let (_, output) = finish(atm);
        assert!(output.ends_with("PIN: Pin incorrect\n"));
    }

    #[test]
    fn test_wrong_entry_option() {
        let mut atm = new_atm("3\n");
        assert_eq!(atm.run().unwrap(), SessionEnd::WrongOption);

        let (_, output) = finish(atm);
        assert!(output.ends_with("Choose: Wrong option, bye!\n"));
    }

    #[test]
    fn test_register_and_use_account() {
        let mut atm = new_atm("2\nBob\nBob Builder\n2468\n100\n1\n5\n");
        assert_eq!(atm.run().unwrap(), SessionEnd::Exited);

        let (store, output) = finish(atm);
        assert!(output.contains(
            "Pick username: Full name: Set 4-digit PIN: Initial deposit Rs.: You are in! Login now.\n\nHey Bob Builder!\n"
        ));
        assert!(output.contains("Balance: Rs. 100.00\n"));
        assert_eq!(store.len(), 4);
        assert!(store.get("bob").unwrap().authenticate(2468));
    }

    #[test]
    fn test_register_rejections() {
        let mut atm = new_atm("2\nnewuser\nNew User\n1234\n-10\n");
        assert_eq!(atm.run().unwrap(), SessionEnd::Rejected(StoreError::NegativeDeposit));
        let (store, output) = finish(atm);
        assert!(output.ends_with("No negative deposits allowed\n"));
        assert_eq!(store.len(), 3);

        let mut atm = new_atm("2\nTOM\n");
        assert_eq!(atm.run().unwrap(), SessionEnd::Rejected(StoreError::UsernameTaken));
        let (_, output) = finish(atm);
        assert!(output.ends_with("Pick username: Username taken, sorry\n"));
    }

    #[test]
    fn test_register_pin_range_when_enforced() {
        let strict = RegistrationConfig { enforce_pin_range: true };
        let mut atm = atm_with("2\nshorty\nShorty\n12\n50\n", strict);

        assert_eq!(
            atm.run().unwrap(),
            SessionEnd::Rejected(StoreError::Pin(PinError::OutOfRange))
        );
        let (store, output) = finish(atm);
        assert!(output.ends_with("Pin gotta be 4 digits, dude\n"));
        assert!(store.get("shorty").is_none());
    }

    #[test]
    fn test_malformed_input_ends_session() {
        let mut atm = new_atm("1\njones\n1234\n2\nlots\n");
        assert!(matches!(atm.run(), Err(AtmError::InvalidNumber(s)) if s == "lots"));
        assert_eq!(atm.state(), SessionState::Terminated);

        let mut atm = new_atm("x\n");
        assert!(matches!(atm.run(), Err(AtmError::InvalidNumber(_))));

        let mut atm = new_atm("1\njones\n1234\n");
        assert!(matches!(atm.run(), Err(AtmError::InputClosed)));
    }
}

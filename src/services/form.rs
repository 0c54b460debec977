//! Transaction form session
//!
//! A [`TransactionForm`] owns the values of one transaction form, the
//! directory lists it offers as choices, and the submission lifecycle:
//! validate, build the operation, hand it to the ledger service. At most one
//! submission per form is outstanding at any time.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::ledger::{DirectoryService, LedgerService, Session};
use crate::models::{
    Account, AccountId, Category, CategoryType, EntryId, NewCategory, RawIntent, Transaction,
    TransactionIntent, TransactionKind,
};
use crate::validation::{default_earliest_date, validate_intent, ValidationContext};

use super::directory::DirectoryLookup;
use super::operation::{build_operation, Operation};

/// Message shown when the ledger service rejects or fails a submission
pub const SUBMISSION_FAILED: &str = "Failed to save transaction. Please try again.";

/// Success notice raised after a submission is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    Transferred,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Created => "Transaction created",
            Self::Updated => "Transaction updated",
            Self::Transferred => "Transfer successful",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Created => "The new transaction has been successfully created.",
            Self::Updated => "The transaction has been successfully updated.",
            Self::Transferred => "Funds have been transferred successfully.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Outcome of an accepted submission
#[derive(Debug, Clone)]
pub struct Submitted {
    pub notice: Notice,
    /// The persisted records: one entry, or both legs of a transfer
    pub transactions: Vec<Transaction>,
}

/// Clears the in-flight flag when the submission ends, however it ends
struct InFlight<'f>(&'f AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One transaction form, in create or edit mode
pub struct TransactionForm<'a> {
    ledger: &'a dyn LedgerService,
    lookup: DirectoryLookup<'a>,
    values: RawIntent,
    editing: Option<EntryId>,
    earliest: NaiveDate,
    in_flight: AtomicBool,
}

impl<'a> TransactionForm<'a> {
    /// An empty form that creates a new expense unless the kind is changed
    pub fn new(ledger: &'a dyn LedgerService, directory: &'a dyn DirectoryService) -> Self {
        Self {
            ledger,
            lookup: DirectoryLookup::new(directory),
            values: RawIntent::default(),
            editing: None,
            earliest: default_earliest_date(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// A form prefilled from an existing entry; submitting it updates that entry
    ///
    /// Transfer legs cannot be edited and are refused here.
    pub fn edit(
        ledger: &'a dyn LedgerService,
        directory: &'a dyn DirectoryService,
        session: &Session,
        id: &EntryId,
    ) -> FinanceResult<Self> {
        let existing = ledger.get_entry(session, id)?;
        let values = RawIntent::from_transaction(&existing)?;

        let mut form = Self::new(ledger, directory);
        form.values = values;
        form.editing = Some(existing.id);
        Ok(form)
    }

    /// Set the earliest date the form accepts
    pub fn with_earliest(mut self, earliest: NaiveDate) -> Self {
        self.earliest = earliest;
        self
    }

    pub fn values(&self) -> &RawIntent {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut RawIntent {
        &mut self.values
    }

    pub fn set_values(&mut self, values: RawIntent) {
        self.values = values;
    }

    /// The entry being edited, if any
    pub fn editing(&self) -> Option<&EntryId> {
        self.editing.as_ref()
    }

    pub fn lookup(&self) -> &DirectoryLookup<'a> {
        &self.lookup
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Categories offered for the current kind
    pub fn category_options(&self, session: &Session) -> FinanceResult<Vec<Category>> {
        self.lookup.category_options(session, self.values.kind)
    }

    /// Accounts offered as a transfer destination for the current source
    pub fn destination_options(&self, session: &Session) -> FinanceResult<Vec<Account>> {
        let source = self.values.account_id.as_deref().map(AccountId::new);
        self.lookup.destination_options(session, source.as_ref())
    }

    /// Create a category without leaving the form
    ///
    /// A missing type defaults to the form's kind, and to EXPENSE for a
    /// transfer. The new category is not selected.
    pub fn create_category(
        &self,
        session: &Session,
        mut form: NewCategory,
    ) -> FinanceResult<Category> {
        if form.category_type.as_deref().map_or(true, |t| t.trim().is_empty()) {
            let default = match self.values.kind {
                TransactionKind::Income => CategoryType::Income,
                TransactionKind::Expense | TransactionKind::Transfer => CategoryType::Expense,
            };
            form.category_type = Some(default.as_str().to_string());
        }
        self.lookup.create_category(session, &form)
    }

    /// Run the validation rules against the loaded directory
    pub fn validate(&self, session: &Session, today: NaiveDate) -> FinanceResult<TransactionIntent> {
        let accounts = self.lookup.accounts(session)?;
        let categories = self.lookup.categories(session)?;
        let ctx = ValidationContext::new(today)
            .with_earliest(self.earliest)
            .with_directory(&accounts, &categories);

        Ok(validate_intent(&self.values, &ctx)?)
    }

    /// Validate the form and send it to the ledger service
    ///
    /// Validation failures come back as [`FinanceError::Validation`] and
    /// nothing is sent. Anything the collaborators report is wrapped as a
    /// [`FinanceError::Submission`]. The entered values are kept either way.
    pub fn submit(&self, session: &Session, today: NaiveDate) -> FinanceResult<Submitted> {
        let _guard = self.begin()?;

        // An edit switched to a transfer is refused before any field errors
        if self.editing.is_some() && self.values.kind == TransactionKind::Transfer {
            return Err(FinanceError::TransferEditUnsupported);
        }

        let intent = match self.validate(session, today) {
            Ok(intent) => intent,
            Err(FinanceError::Validation(errors)) => {
                debug!(fields = ?errors.fields(), "Form has validation errors");
                return Err(FinanceError::Validation(errors));
            }
            Err(e) => return Err(Self::failed(e)),
        };

        let operation = build_operation(&intent, self.editing.as_ref())?;
        let submitted = self.execute(session, &operation).map_err(Self::failed)?;

        info!(
            notice = %submitted.notice,
            records = submitted.transactions.len(),
            "Submission accepted"
        );
        Ok(submitted)
    }

    fn begin(&self) -> FinanceResult<InFlight<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FinanceError::SubmissionInFlight);
        }
        Ok(InFlight(&self.in_flight))
    }

    fn execute(&self, session: &Session, operation: &Operation) -> FinanceResult<Submitted> {
        Ok(match operation {
            Operation::CreateEntry(entry) => Submitted {
                notice: Notice::Created,
                transactions: vec![self.ledger.create_entry(session, entry)?],
            },
            Operation::UpdateEntry { id, entry } => Submitted {
                notice: Notice::Updated,
                transactions: vec![self.ledger.update_entry(session, id, entry)?],
            },
            Operation::Transfer(transfer) => {
                let receipt = self.ledger.create_transfer(session, transfer)?;
                Submitted {
                    notice: Notice::Transferred,
                    transactions: vec![receipt.from_transaction, receipt.to_transaction],
                }
            }
        })
    }

    fn failed(error: FinanceError) -> FinanceError {
        warn!(error = %error, "Submission failed");
        FinanceError::submission(SUBMISSION_FAILED, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedgerEntry, Money, TransferOperation, TransferReceipt, UserId};
    use crate::services::directory::tests::{session, FakeDirectory};
    use std::sync::{Barrier, Mutex};
    use std::thread;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn stored(entry: &LedgerEntry) -> Transaction {
        Transaction::from_entry(UserId::new("u1"), entry)
    }

    /// Records every operation it receives; fails all writes when `fail` is set
    #[derive(Default)]
    struct FakeLedger {
        fail: bool,
        received: Mutex<Vec<Operation>>,
        existing: Mutex<Vec<Transaction>>,
    }

    impl FakeLedger {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn received(&self) -> Vec<Operation> {
            self.received.lock().unwrap().clone()
        }

        fn write(&self, operation: Operation) -> FinanceResult<()> {
            self.received.lock().unwrap().push(operation);
            if self.fail {
                return Err(FinanceError::Storage("connection reset".into()));
            }
            Ok(())
        }
    }

    impl LedgerService for FakeLedger {
        fn create_entry(&self, _s: &Session, entry: &LedgerEntry) -> FinanceResult<Transaction> {
            self.write(Operation::CreateEntry(entry.clone()))?;
            Ok(stored(entry))
        }

        fn update_entry(
            &self,
            _s: &Session,
            id: &EntryId,
            entry: &LedgerEntry,
        ) -> FinanceResult<Transaction> {
            self.write(Operation::UpdateEntry {
                id: id.clone(),
                entry: entry.clone(),
            })?;
            let mut txn = stored(entry);
            txn.id = id.clone();
            Ok(txn)
        }

        fn create_transfer(
            &self,
            _s: &Session,
            transfer: &TransferOperation,
        ) -> FinanceResult<TransferReceipt> {
            self.write(Operation::Transfer(transfer.clone()))?;
            let user = UserId::new("u1");
            Ok(TransferReceipt {
                from_transaction: Transaction::new(
                    user.clone(),
                    transfer.from_account_id().clone(),
                    transfer.date(),
                    -transfer.amount(),
                    transfer.description(),
                ),
                to_transaction: Transaction::new(
                    user,
                    transfer.to_account_id().clone(),
                    transfer.date(),
                    transfer.amount(),
                    transfer.description(),
                ),
            })
        }

        fn get_entry(&self, _s: &Session, id: &EntryId) -> FinanceResult<Transaction> {
            self.existing
                .lock()
                .unwrap()
                .iter()
                .find(|t| &t.id == id)
                .cloned()
                .ok_or_else(|| FinanceError::entry_not_found(id.as_str()))
        }

        fn list_entries(&self, _s: &Session) -> FinanceResult<Vec<Transaction>> {
            Ok(self.existing.lock().unwrap().clone())
        }
    }

    fn groceries() -> RawIntent {
        RawIntent::new(TransactionKind::Expense)
            .description("Groceries")
            .amount("42.50")
            .date(today())
            .account("acc1")
            .category("cat1")
    }

    #[test]
    fn test_create_expense() {
        let ledger = FakeLedger::default();
        let directory = FakeDirectory::seeded();
        let mut form = TransactionForm::new(&ledger, &directory);
        form.set_values(groceries());

        let submitted = form.submit(&session(), today()).unwrap();
        assert_eq!(submitted.notice, Notice::Created);
        assert_eq!(submitted.notice.to_string(), "Transaction created");
        assert_eq!(submitted.transactions.len(), 1);

        let Operation::CreateEntry(entry) = &ledger.received()[0] else {
            panic!("expected a new entry");
        };
        assert_eq!(entry.signed_amount(), Money::from_cents(-4250));
    }

    #[test]
    fn test_transfer_returns_both_legs() {
        let ledger = FakeLedger::default();
        let directory = FakeDirectory::seeded();
        let mut form = TransactionForm::new(&ledger, &directory);
        form.set_values(
            RawIntent::new(TransactionKind::Transfer)
                .description("Savings")
                .amount("100")
                .date(today())
                .account("acc1")
                .to_account("acc2")
                .category("cat1"),
        );

        let submitted = form.submit(&session(), today()).unwrap();
        assert_eq!(submitted.notice, Notice::Transferred);
        assert_eq!(submitted.transactions.len(), 2);
        assert!(matches!(ledger.received()[0], Operation::Transfer(_)));
    }

    #[test]
    fn test_validation_errors_never_reach_ledger() {
        let ledger = FakeLedger::default();
        let directory = FakeDirectory::seeded();
        let mut form = TransactionForm::new(&ledger, &directory);
        form.set_values(groceries().description("G").amount("abc"));

        let err = form.submit(&session(), today()).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(errors.get(crate::validation::Field::Description).is_some());
        assert!(errors.get(crate::validation::Field::Amount).is_some());
        assert!(ledger.received().is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_unknown_account_is_a_validation_error() {
        let ledger = FakeLedger::default();
        let directory = FakeDirectory::seeded();
        let mut form = TransactionForm::new(&ledger, &directory);
        form.set_values(groceries().account("acc9"));

        assert!(form.submit(&session(), today()).unwrap_err().is_validation());
        assert!(ledger.received().is_empty());
    }

    #[test]
    fn test_ledger_failure_is_submission_error_and_keeps_values() {
        let ledger = FakeLedger::failing();
        let directory = FakeDirectory::seeded();
        let mut form = TransactionForm::new(&ledger, &directory);
        form.set_values(groceries());

        let err = form.submit(&session(), today()).unwrap_err();
        assert!(err.is_submission());
        assert_eq!(err.to_string(), SUBMISSION_FAILED);
        assert_eq!(form.values(), &groceries());
        assert!(!form.is_submitting());

        // The form can be resubmitted after a failure
        assert!(form.submit(&session(), today()).unwrap_err().is_submission());
        assert_eq!(ledger.received().len(), 2);
    }

    #[test]
    fn test_edit_prefills_and_updates() {
        let ledger = FakeLedger::default();
        let mut existing = Transaction::new(
            UserId::new("u1"),
            AccountId::new("acc1"),
            today(),
            Money::from_cents(-1000),
            "Lunch",
        );
        existing.category_id = Some(crate::models::CategoryId::new("cat1"));
        let id = existing.id.clone();
        ledger.existing.lock().unwrap().push(existing);
        let directory = FakeDirectory::seeded();

        let mut form = TransactionForm::edit(&ledger, &directory, &session(), &id).unwrap();
        assert_eq!(form.values().amount, "10.00");
        assert_eq!(form.editing(), Some(&id));

        form.values_mut().amount = "12".into();
        let submitted = form.submit(&session(), today()).unwrap();
        assert_eq!(submitted.notice, Notice::Updated);

        match &ledger.received()[0] {
            Operation::UpdateEntry { id: got, entry } => {
                assert_eq!(got, &id);
                assert_eq!(entry.signed_amount(), Money::from_cents(-1200));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_edit_cannot_become_transfer() {
        let ledger = FakeLedger::default();
        let mut existing = Transaction::new(
            UserId::new("u1"),
            AccountId::new("acc1"),
            today(),
            Money::from_cents(-1000),
            "Lunch",
        );
        existing.category_id = Some(crate::models::CategoryId::new("cat1"));
        let id = existing.id.clone();
        ledger.existing.lock().unwrap().push(existing);
        let directory = FakeDirectory::seeded();

        let mut form = TransactionForm::edit(&ledger, &directory, &session(), &id).unwrap();
        form.values_mut().kind = TransactionKind::Transfer;
        form.values_mut().to_account_id = Some("acc2".into());

        let err = form.submit(&session(), today()).unwrap_err();
        assert!(matches!(err, FinanceError::TransferEditUnsupported));
        assert!(ledger.received().is_empty());

        // Without a destination the refusal still wins over field errors
        form.values_mut().to_account_id = None;
        let err = form.submit(&session(), today()).unwrap_err();
        assert!(matches!(err, FinanceError::TransferEditUnsupported));
        assert!(ledger.received().is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_create_category_defaults_to_form_kind() {
        let ledger = FakeLedger::default();
        let directory = FakeDirectory::seeded();
        let mut form = TransactionForm::new(&ledger, &directory);
        form.values_mut().kind = TransactionKind::Income;

        let created = form
            .create_category(
                &session(),
                NewCategory {
                    name: "Bonus".into(),
                    category_type: None,
                    parent_id: None,
                },
            )
            .unwrap();

        assert_eq!(created.category_type, CategoryType::Income);
        assert_eq!(form.values().category_id, None);
        assert!(form
            .category_options(&session())
            .unwrap()
            .iter()
            .any(|c| c.id == created.id));
    }

    /// Holds create_entry open until the test releases it
    struct BlockingLedger {
        entered: Barrier,
        release: Barrier,
        inner: FakeLedger,
    }

    impl LedgerService for BlockingLedger {
        fn create_entry(&self, s: &Session, entry: &LedgerEntry) -> FinanceResult<Transaction> {
            self.entered.wait();
            self.release.wait();
            self.inner.create_entry(s, entry)
        }

        fn update_entry(
            &self,
            s: &Session,
            id: &EntryId,
            entry: &LedgerEntry,
        ) -> FinanceResult<Transaction> {
            self.inner.update_entry(s, id, entry)
        }

        fn create_transfer(
            &self,
            s: &Session,
            transfer: &TransferOperation,
        ) -> FinanceResult<TransferReceipt> {
            self.inner.create_transfer(s, transfer)
        }

        fn get_entry(&self, s: &Session, id: &EntryId) -> FinanceResult<Transaction> {
            self.inner.get_entry(s, id)
        }

        fn list_entries(&self, s: &Session) -> FinanceResult<Vec<Transaction>> {
            self.inner.list_entries(s)
        }
    }

    #[test]
    fn test_second_submit_while_in_flight_is_refused() {
        let ledger = BlockingLedger {
            entered: Barrier::new(2),
            release: Barrier::new(2),
            inner: FakeLedger::default(),
        };
        let directory = FakeDirectory::seeded();
        let mut form = TransactionForm::new(&ledger, &directory);
        form.set_values(groceries());
        let form = &form;

        thread::scope(|s| {
            let first = s.spawn(move || form.submit(&session(), today()));

            ledger.entered.wait();
            assert!(form.is_submitting());
            assert!(matches!(
                form.submit(&session(), today()),
                Err(FinanceError::SubmissionInFlight)
            ));
            ledger.release.wait();

            assert!(first.join().unwrap().is_ok());
        });

        assert!(!form.is_submitting());
        assert_eq!(ledger.inner.received().len(), 1);
    }
}

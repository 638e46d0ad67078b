use api_types::{
    Money,
    transaction::{Transaction, TransactionKind},
};

/// Field focus order inside the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Price,
    Category,
}

/// Whether the form creates a new record or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormIntent {
    Create,
    Edit { id: u64 },
}

/// Validated form output, ready to hand to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct FormOutput {
    pub description: String,
    pub price: Money,
    pub category: String,
    pub kind: TransactionKind,
}

/// Create/edit form: free-text description/price/category plus an
/// income/outcome toggle.
///
/// Validation happens here, before any remote call: the store never sees
/// a draft this type did not accept.
#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub intent: FormIntent,
    pub description: String,
    pub price: String,
    pub category: String,
    pub kind: TransactionKind,
    pub focus: FormField,
    pub error: Option<String>,
}

impl TransactionForm {
    pub fn create() -> Self {
        Self {
            intent: FormIntent::Create,
            description: String::new(),
            price: String::new(),
            category: String::new(),
            kind: TransactionKind::Income,
            focus: FormField::Description,
            error: None,
        }
    }

    /// Pre-filled with the row's current values.
    pub fn edit(tx: &Transaction) -> Self {
        Self {
            intent: FormIntent::Edit { id: tx.id },
            description: tx.description.clone(),
            price: tx.price.decimal(),
            category: tx.category.clone(),
            kind: tx.kind,
            focus: FormField::Description,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Description => FormField::Price,
            FormField::Price => FormField::Category,
            FormField::Category => FormField::Description,
        };
    }

    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            TransactionKind::Income => TransactionKind::Outcome,
            TransactionKind::Outcome => TransactionKind::Income,
        };
    }

    pub fn push(&mut self, ch: char) {
        self.active_field_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.active_field_mut().pop();
    }

    /// Checks all fields; on failure stores a message in `self.error` and
    /// returns `None`.
    pub fn validate(&mut self) -> Option<FormOutput> {
        let description = self.description.trim();
        if description.is_empty() {
            self.error = Some("Description is required.".to_string());
            return None;
        }

        let category = self.category.trim();
        if category.is_empty() {
            self.error = Some("Category is required.".to_string());
            return None;
        }

        let price = match self.price.parse::<Money>() {
            Ok(price) => price,
            Err(err) => {
                self.error = Some(format!("Price: {err}."));
                return None;
            }
        };
        if price.is_negative() {
            self.error = Some("Price must not be negative.".to_string());
            return None;
        }

        self.error = None;
        Some(FormOutput {
            description: description.to_string(),
            price,
            category: category.to_string(),
            kind: self.kind,
        })
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Description => &mut self.description,
            FormField::Price => &mut self.price,
            FormField::Category => &mut self.category,
        }
    }
}

//! CSV import service
//!
//! Parses a bulk expense file and replaces the ledger's expense set with it.
//!
//! Required columns are `month`, `kind`, `description` and `amount`;
//! `category` and `income` are optional. The Portuguese backup headers
//! (`mes`, `tipo`, `categoria`, `descricao`, `valor`, `salario`) are accepted
//! too, in any case and with or without accents. A missing or unknown
//! category falls back to "Outros"; every other bad value rejects the file.
//! If the income column is present, the first row's value replaces the
//! stored income in the same transaction as the expense replacement.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use crate::error::{DashboardError, DashboardResult};
use crate::models::text::fold_label;
use crate::models::{Category, ExpenseKind, Money, Month, NewExpense};
use crate::storage::Storage;

/// A logical column and the header names it may appear under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Month,
    Kind,
    Category,
    Description,
    Amount,
    Income,
}

impl Column {
    fn name(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Kind => "kind",
            Self::Category => "category",
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Income => "income",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Month => &["month", "mes"],
            Self::Kind => &["kind", "tipo", "type"],
            Self::Category => &["category", "categoria"],
            Self::Description => &["description", "descricao"],
            Self::Amount => &["amount", "valor", "value"],
            Self::Income => &["income", "salario"],
        }
    }

    fn find(&self, headers: &[String]) -> Option<usize> {
        let aliases = self.aliases();
        headers.iter().position(|h| aliases.contains(&h.as_str()))
    }
}

/// Resolved column positions
#[derive(Debug, Clone, Copy)]
struct ColumnMapping {
    month: usize,
    kind: usize,
    category: Option<usize>,
    description: usize,
    amount: usize,
    income: Option<usize>,
}

impl ColumnMapping {
    fn from_headers(headers: &StringRecord) -> DashboardResult<Self> {
        let folded: Vec<String> = headers.iter().map(fold_label).collect();
        let required = |column: Column| {
            column.find(&folded).ok_or_else(|| {
                DashboardError::Validation(format!(
                    "missing required column '{}'",
                    column.name()
                ))
            })
        };

        Ok(Self {
            month: required(Column::Month)?,
            kind: required(Column::Kind)?,
            category: Column::Category.find(&folded),
            description: required(Column::Description)?,
            amount: required(Column::Amount)?,
            income: Column::Income.find(&folded),
        })
    }
}

/// The content of a bulk file, ready to be applied
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedImport {
    pub expenses: Vec<NewExpense>,
    /// First row's income value, when the column exists and is filled
    pub income: Option<Money>,
}

fn field<'r>(record: &'r StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or("")
}

fn row_error(row: usize, err: impl std::fmt::Display) -> DashboardError {
    DashboardError::Validation(format!("row {}: {}", row, err))
}

fn parse_row(
    record: &StringRecord,
    mapping: &ColumnMapping,
    row: usize,
) -> DashboardResult<NewExpense> {
    let month_raw = field(record, mapping.month);
    let month = Month::parse(month_raw)
        .ok_or_else(|| row_error(row, format!("month: unknown month '{}'", month_raw)))?;

    let kind_raw = field(record, mapping.kind);
    let kind = ExpenseKind::parse(kind_raw)
        .ok_or_else(|| row_error(row, format!("kind: unknown kind '{}'", kind_raw)))?;

    let category = mapping
        .category
        .map(|i| Category::parse_or_other(field(record, i)))
        .unwrap_or_default();

    let amount_raw = field(record, mapping.amount);
    let amount = Money::parse(amount_raw)
        .map_err(|e| row_error(row, format!("amount: {}", e)))?;

    let expense = NewExpense::new(
        month,
        kind,
        category,
        field(record, mapping.description),
        amount,
    );
    expense.validate().map_err(|e| row_error(row, e))?;
    Ok(expense)
}

/// Parse a bulk file without touching storage
///
/// Rows are numbered from 1, not counting the header.
pub fn parse_csv<R: Read>(reader: R) -> DashboardResult<ParsedImport> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mapping = ColumnMapping::from_headers(csv_reader.headers()?)?;

    let mut parsed = ParsedImport::default();
    for (index, result) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = result.map_err(|e| {
            if e.is_io_error() {
                DashboardError::from(e)
            } else {
                row_error(row, format!("malformed CSV: {}", e))
            }
        })?;

        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        if parsed.expenses.is_empty() {
            if let Some(col) = mapping.income {
                let raw = field(&record, col);
                if !raw.is_empty() {
                    let income =
                        Money::parse(raw).map_err(|e| row_error(row, format!("income: {}", e)))?;
                    parsed.income = Some(income);
                }
            }
        }

        parsed.expenses.push(parse_row(&record, &mapping, row)?);
    }

    Ok(parsed)
}

/// What an import changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub income: Option<Money>,
}

/// Service that applies bulk files to storage
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse `reader` and replace the expense set with its rows
    ///
    /// Parse errors reject the whole file before any change is made.
    pub fn import_csv<R: Read>(&self, reader: R) -> DashboardResult<ImportSummary> {
        let parsed = parse_csv(reader)?;
        self.apply(parsed)
    }

    pub fn import_file(&self, path: &Path) -> DashboardResult<ImportSummary> {
        let file = File::open(path).map_err(|e| {
            DashboardError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let summary = self.import_csv(file)?;
        info!(path = %path.display(), imported = summary.imported, "imported file");
        Ok(summary)
    }

    pub fn apply(&self, parsed: ParsedImport) -> DashboardResult<ImportSummary> {
        let income = parsed.income;
        let imported = self.storage.import_with_income(parsed.expenses, income)?;
        Ok(ImportSummary { imported, income })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardPaths;
    use crate::services::IncomeService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_parse_english_headers() {
        let data = "month,kind,category,description,amount\n\
                    Janeiro,Fixo,Moradia,Aluguel,1500.00\n\
                    february,variable,Leisure,Cinema,50\n";
        let parsed = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(parsed.income, None);
        assert_eq!(parsed.expenses.len(), 2);
        assert_eq!(parsed.expenses[0].month, Month::January);
        assert_eq!(parsed.expenses[0].kind, ExpenseKind::Fixed);
        assert_eq!(parsed.expenses[0].category, Category::Housing);
        assert_eq!(parsed.expenses[1].month, Month::February);
        assert_eq!(parsed.expenses[1].amount, Money::from_cents(5000));
    }

    #[test]
    fn test_parse_portuguese_headers_with_income() {
        let data = "Mês,Tipo,Categoria,Descrição,Valor,Salário\n\
                    Março,Variável,Alimentação,Mercado,\"320,50\",4500.00\n\
                    Março,Fixo,Saúde,Plano,200.00,4500.00\n";
        let parsed = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(parsed.income, Some(Money::from_cents(450000)));
        assert_eq!(parsed.expenses[0].category, Category::Food);
        assert_eq!(parsed.expenses[0].amount, Money::from_cents(32050));
        assert_eq!(parsed.expenses[1].kind, ExpenseKind::Fixed);
    }

    #[test]
    fn test_missing_or_unknown_category_is_other() {
        let data = "month,kind,description,amount\nJaneiro,Fixo,Aluguel,10\n";
        let parsed = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(parsed.expenses[0].category, Category::Other);

        let data = "month,kind,category,description,amount\nJaneiro,Fixo,Gadgets,Fone,10\n";
        let parsed = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(parsed.expenses[0].category, Category::Other);
    }

    #[test]
    fn test_missing_description_column_is_validation_error() {
        let data = "month,kind,category,amount\nJaneiro,Fixo,Moradia,10\n";
        let err = parse_csv(data.as_bytes()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_bad_rows_name_the_row_and_field() {
        let data = "month,kind,description,amount\nJaneiro,Fixo,Aluguel,10\nSmarch,Fixo,x,1\n";
        let err = parse_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
        assert!(err.to_string().contains("month"));

        let data = "month,kind,description,amount\nJaneiro,Mensal,x,1\n";
        assert!(parse_csv(data.as_bytes()).unwrap_err().to_string().contains("kind"));

        let data = "month,kind,description,amount\nJaneiro,Fixo,,1\n";
        assert!(parse_csv(data.as_bytes())
            .unwrap_err()
            .to_string()
            .contains("description"));

        let data = "month,kind,description,amount\nJaneiro,Fixo,x,0\n";
        assert!(parse_csv(data.as_bytes()).unwrap_err().to_string().contains("amount"));
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_read_failure_is_io_error() {
        let err = parse_csv(BrokenReader).unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }

    #[test]
    fn test_header_only_file_parses_empty() {
        let parsed = parse_csv("month,kind,description,amount\n".as_bytes()).unwrap();
        assert!(parsed.expenses.is_empty());
    }

    #[test]
    fn test_failed_import_keeps_existing_expenses() {
        let (_temp, storage) = create_test_storage();
        storage
            .add_expense(NewExpense::new(
                Month::January,
                ExpenseKind::Fixed,
                Category::Housing,
                "Aluguel",
                Money::from_cents(150000),
            ))
            .unwrap();
        let before = storage.snapshot().unwrap();

        let data = "month,kind,category,amount\nFevereiro,Fixo,Moradia,10\n";
        let err = ImportService::new(&storage)
            .import_csv(data.as_bytes())
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(storage.snapshot().unwrap(), before);
    }

    #[test]
    fn test_import_replaces_expenses_and_income() {
        let (_temp, storage) = create_test_storage();
        IncomeService::new(&storage)
            .set_income(Money::from_cents(100000))
            .unwrap();

        let data = "month,kind,category,description,amount,income\n\
                    Abril,Fixo,Educação,Curso,300,5200.00\n";
        let summary = ImportService::new(&storage)
            .import_csv(data.as_bytes())
            .unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.income, Some(Money::from_cents(520000)));
        assert_eq!(
            IncomeService::new(&storage).income().unwrap(),
            Money::from_cents(520000)
        );
        assert_eq!(storage.all_expenses().unwrap()[0].category, Category::Education);
    }

    #[test]
    fn test_import_without_income_keeps_income() {
        let (_temp, storage) = create_test_storage();
        IncomeService::new(&storage)
            .set_income(Money::from_cents(100000))
            .unwrap();

        let data = "month,kind,description,amount\nAbril,Fixo,Curso,300\n";
        ImportService::new(&storage).import_csv(data.as_bytes()).unwrap();

        assert_eq!(
            IncomeService::new(&storage).income().unwrap(),
            Money::from_cents(100000)
        );
    }
}

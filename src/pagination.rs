// src/pagination.rs

/// Número de linhas por página nas listagens.
pub const PAGE_SIZE: usize = 5;

/// Uma página de resultados, já recortada da lista completa.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// Recorta `items` na página pedida em `raw_page` (valor cru da query string).
    ///
    /// - ausente ou não inteiro: página 1
    /// - fora do intervalo (inclui 0 e negativos): última página
    ///
    /// Uma lista vazia tem sempre uma página (vazia).
    pub fn paginate(items: Vec<T>, raw_page: Option<&str>, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total = items.len();
        let num_pages = total.div_ceil(per_page).max(1);

        let number = match raw_page.map(str::trim) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n >= 1 && (n as u64) <= num_pages as u64 => n as usize,
                // Inteiro fora do intervalo, mesmo que não caiba em i64
                Ok(_) => out_of_range(raw, num_pages),
                Err(_) if is_integer_literal(raw) => out_of_range(raw, num_pages),
                Err(_) => 1,
            },
            None => 1,
        };

        let start = (number - 1) * per_page;
        let items = items.into_iter().skip(start).take(per_page).collect();

        Page {
            items,
            number,
            num_pages,
            total,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn previous_number(&self) -> usize {
        self.number.saturating_sub(1).max(1)
    }

    pub fn next_number(&self) -> usize {
        (self.number + 1).min(self.num_pages)
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.num_pages).collect()
    }
}

fn out_of_range(raw: &str, num_pages: usize) -> usize {
    tracing::debug!("Página {} fora do intervalo, usando a última ({})", raw, num_pages);
    num_pages
}

/// Sinal opcional seguido só de dígitos.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

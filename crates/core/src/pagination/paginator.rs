use serde::Serialize;

use super::error::PageError;

/// Default number of images per list page.
pub const DEFAULT_PER_PAGE: usize = 8;

/// Splits `count` items into pages of `per_page` items.
///
/// An empty collection still has one (empty) first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: usize,
    per_page: usize,
}

/// A resolved page: its number plus the slice bounds to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    /// Index of the first item of the page in the full collection.
    pub offset: usize,
    /// Number of items on this page.
    pub limit: usize,
}

/// What a list request should render once its page number is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Render the items of this page.
    Page(Page),
    /// Render nothing (out-of-range page requested by an infinite-scroll client).
    Empty,
}

impl Paginator {
    /// Creates a paginator. A `per_page` of zero is treated as one.
    pub fn new(count: usize, per_page: usize) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Total number of pages, never less than one.
    pub fn num_pages(&self) -> usize {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page)
        }
    }

    /// Parses and range-checks a raw page number.
    pub fn validate_number(&self, raw: Option<&str>) -> Result<usize, PageError> {
        let number = parse_page_number(raw.ok_or(PageError::NotAnInteger)?)?;

        if number < 1 {
            return Err(PageError::LessThanOne);
        }

        let number = usize::try_from(number).map_err(|_| PageError::NoResults)?;
        if number > self.num_pages() {
            return Err(PageError::NoResults);
        }

        Ok(number)
    }

    /// Resolves a raw page number into a page.
    pub fn page(&self, raw: Option<&str>) -> Result<Page, PageError> {
        let number = self.validate_number(raw)?;
        Ok(self.page_at(number))
    }

    /// Builds the page with the given number, clamped into the valid range.
    pub fn page_at(&self, number: usize) -> Page {
        let number = number.clamp(1, self.num_pages());
        let offset = (number - 1) * self.per_page;
        let limit = self.count.saturating_sub(offset).min(self.per_page);

        Page {
            number,
            num_pages: self.num_pages(),
            count: self.count,
            offset,
            limit,
        }
    }

    /// The last page.
    pub fn last_page(&self) -> Page {
        self.page_at(self.num_pages())
    }
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_other_pages(&self) -> bool {
        self.has_next() || self.has_previous()
    }

    pub fn next_page_number(&self) -> Option<usize> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<usize> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on the page (0 for an empty collection).
    pub fn start_index(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            self.offset + 1
        }
    }

    /// 1-based index of the last item on the page.
    pub fn end_index(&self) -> usize {
        self.offset + self.limit
    }
}

/// Resolves the page a list request should render.
///
/// - a missing or non-integer page falls back to the first page;
/// - an out-of-range page renders nothing for AJAX requests and the last
///   page otherwise.
pub fn resolve_page(paginator: &Paginator, raw: Option<&str>, is_ajax: bool) -> PageOutcome {
    match paginator.page(raw) {
        Ok(page) => PageOutcome::Page(page),
        Err(PageError::NotAnInteger) => PageOutcome::Page(paginator.page_at(1)),
        Err(_) if is_ajax => PageOutcome::Empty,
        Err(_) => PageOutcome::Page(paginator.last_page()),
    }
}

/// Parses an integer page number.
///
/// Accepts surrounding whitespace and a leading sign. Values too large to
/// represent saturate, so they still count as out of range rather than
/// as non-integers.
fn parse_page_number(raw: &str) -> Result<i64, PageError> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PageError::NotAnInteger);
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages() {
        assert_eq!(Paginator::new(0, 8).num_pages(), 1);
        assert_eq!(Paginator::new(1, 8).num_pages(), 1);
        assert_eq!(Paginator::new(8, 8).num_pages(), 1);
        assert_eq!(Paginator::new(9, 8).num_pages(), 2);
        assert_eq!(Paginator::new(17, 8).num_pages(), 3);
    }

    #[test]
    fn test_zero_per_page_is_one() {
        let paginator = Paginator::new(3, 0);
        assert_eq!(paginator.per_page(), 1);
        assert_eq!(paginator.num_pages(), 3);
    }

    #[test]
    fn test_validate_number_accepts_padded_and_signed() {
        let paginator = Paginator::new(20, 8);
        assert_eq!(paginator.validate_number(Some(" 2 ")), Ok(2));
        assert_eq!(paginator.validate_number(Some("+3")), Ok(3));
        assert_eq!(paginator.validate_number(Some("003")), Ok(3));
    }

    #[test]
    fn test_validate_number_rejects_non_integers() {
        let paginator = Paginator::new(20, 8);
        assert_eq!(paginator.validate_number(None), Err(PageError::NotAnInteger));
        assert_eq!(paginator.validate_number(Some("")), Err(PageError::NotAnInteger));
        assert_eq!(paginator.validate_number(Some("abc")), Err(PageError::NotAnInteger));
        assert_eq!(paginator.validate_number(Some("2.0")), Err(PageError::NotAnInteger));
        assert_eq!(paginator.validate_number(Some("-")), Err(PageError::NotAnInteger));
    }

    #[test]
    fn test_validate_number_out_of_range() {
        let paginator = Paginator::new(20, 8);
        assert_eq!(paginator.validate_number(Some("0")), Err(PageError::LessThanOne));
        assert_eq!(paginator.validate_number(Some("-4")), Err(PageError::LessThanOne));
        assert_eq!(paginator.validate_number(Some("4")), Err(PageError::NoResults));
        assert_eq!(
            paginator.validate_number(Some("99999999999999999999999")),
            Err(PageError::NoResults)
        );
    }

    #[test]
    fn test_first_page_of_empty_collection_is_valid() {
        let paginator = Paginator::new(0, 8);
        let page = paginator.page(Some("1")).unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.limit, 0);
        assert_eq!(page.start_index(), 0);
        assert_eq!(page.end_index(), 0);
        assert!(!page.has_other_pages());
    }

    #[test]
    fn test_page_bounds() {
        let paginator = Paginator::new(17, 8);

        let first = paginator.page_at(1);
        assert_eq!((first.offset, first.limit), (0, 8));
        assert_eq!(first.next_page_number(), Some(2));
        assert_eq!(first.previous_page_number(), None);

        let last = paginator.page_at(3);
        assert_eq!((last.offset, last.limit), (16, 1));
        assert_eq!(last.start_index(), 17);
        assert_eq!(last.end_index(), 17);
        assert!(!last.has_next());
        assert_eq!(last.previous_page_number(), Some(2));
    }

    #[test]
    fn test_page_at_clamps() {
        let paginator = Paginator::new(17, 8);
        assert_eq!(paginator.page_at(0).number, 1);
        assert_eq!(paginator.page_at(10).number, 3);
    }

    #[test]
    fn test_resolve_page_non_integer_goes_to_first_page() {
        let paginator = Paginator::new(30, 8);
        for raw in [None, Some("abc"), Some("1.5")] {
            match resolve_page(&paginator, raw, false) {
                PageOutcome::Page(page) => assert_eq!(page.number, 1),
                PageOutcome::Empty => panic!("Expected first page"),
            }
            // AJAX requests get the first page too
            assert!(matches!(
                resolve_page(&paginator, raw, true),
                PageOutcome::Page(Page { number: 1, .. })
            ));
        }
    }

    #[test]
    fn test_resolve_page_out_of_range_non_ajax_goes_to_last_page() {
        let paginator = Paginator::new(30, 8);
        for raw in ["5", "0", "-1"] {
            match resolve_page(&paginator, Some(raw), false) {
                PageOutcome::Page(page) => assert_eq!(page.number, 4),
                PageOutcome::Empty => panic!("Expected last page"),
            }
        }
    }

    #[test]
    fn test_resolve_page_out_of_range_ajax_is_empty() {
        let paginator = Paginator::new(30, 8);
        assert_eq!(resolve_page(&paginator, Some("5"), true), PageOutcome::Empty);
        assert_eq!(resolve_page(&paginator, Some("0"), true), PageOutcome::Empty);
    }

    #[test]
    fn test_resolve_page_valid() {
        let paginator = Paginator::new(30, 8);
        assert_eq!(
            resolve_page(&paginator, Some("2"), true),
            PageOutcome::Page(paginator.page_at(2))
        );
    }

    #[test]
    fn test_resolve_page_empty_collection_ajax_page_two() {
        let paginator = Paginator::new(0, 8);
        assert_eq!(resolve_page(&paginator, Some("2"), true), PageOutcome::Empty);
        assert_eq!(
            resolve_page(&paginator, Some("2"), false),
            PageOutcome::Page(paginator.page_at(1))
        );
    }
}

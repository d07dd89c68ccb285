//! Shared test utilities for folio-db tests.

//! Menu-driven front end. The shell owns the [`Catalog`] and the prompt
//! streams, and walks a small state machine: every operation returns to the
//! menu, and only `0` (or closing stdin) reaches `Exit`.

mod prompt;
mod table;

use std::io::{BufRead, Write};

use anyhow::Result;
use log::debug;

use crate::catalog::Catalog;
use crate::db::{add_book, delete_book, search_books, update_book, view_books, Database};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{AuthorPatch, BookListing, BookUpdate, NewBook, ViewMode};

use prompt::{EndOfInput, Prompt};
use table::{books_table, credits_table};

const MENU: &str = "\n1. Enter book\n\
                    2. Update book\n\
                    3. Delete book\n\
                    4. Search books\n\
                    5. View details of all books\n\
                    0. Exit";

const NOT_A_NUMBER: &str = "Invalid input, enter digital number";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Menu,
    Add,
    Update,
    Delete,
    Search,
    View,
    Exit,
}

impl State {
    /// Map a menu selection to the state it enters.
    fn from_selection(selection: &str) -> Option<Self> {
        match selection {
            "1" => Some(State::Add),
            "2" => Some(State::Update),
            "3" => Some(State::Delete),
            "4" => Some(State::Search),
            "5" => Some(State::View),
            "0" => Some(State::Exit),
            _ => None,
        }
    }
}

pub struct Shell<R, W> {
    db: Database,
    catalog: Catalog,
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// The catalog should already be initialized against `db`.
    pub fn new(db: Database, catalog: Catalog, input: R, output: W) -> Self {
        Self {
            db,
            catalog,
            prompt: Prompt::new(input, output),
        }
    }

    /// Color status messages; meant for output that is a terminal.
    pub fn with_color(mut self, color: bool) -> Self {
        self.prompt.set_color(color);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Hand back the output stream, mostly so tests can inspect the transcript.
    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Drive the menu until the user exits. Storage failures end the loop and
    /// are returned; everything else is reported and the menu comes back.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::Menu;
        loop {
            let next = match self.step(state) {
                Ok(next) => next,
                Err(err) if err.is::<EndOfInput>() => State::Exit,
                Err(err) => return Err(err),
            };
            if next == State::Exit {
                debug!("leaving shell");
                return Ok(());
            }
            state = next;
        }
    }

    fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::Menu => self.select(),
            State::Add => self.add().map(|_| State::Menu),
            State::Update => self.update().map(|_| State::Menu),
            State::Delete => self.delete().map(|_| State::Menu),
            State::Search => self.search().map(|_| State::Menu),
            State::View => self.show(ViewMode::WithAuthors).map(|_| State::Menu),
            State::Exit => Ok(State::Exit),
        }
    }

    fn select(&mut self) -> Result<State> {
        self.prompt.say(MENU)?;
        let selection = self.prompt.line("")?;
        match State::from_selection(selection.trim()) {
            Some(state) => Ok(state),
            None => {
                self.prompt
                    .error("Invalid input, please select from the menu provided")?;
                Ok(State::Menu)
            }
        }
    }

    fn add(&mut self) -> Result<()> {
        let title = self.prompt.line("\nEnter book title: ")?;
        let qty = self.prompt.integer("Enter book quantity: ", NOT_A_NUMBER)?;
        let author_name = self.prompt.line("Enter author's name: ")?;
        let author_country = self.prompt.line("Enter author's country: ")?;

        let new_book = NewBook {
            title,
            qty,
            author_name,
            author_country,
        };
        let result = add_book(&self.db, &mut self.catalog, &new_book);
        if self.settle(result)?.is_some() {
            self.prompt.info("Book successfully entered")?;
        }
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        self.show(ViewMode::Books)?;

        let book_id = self
            .prompt
            .four_digit_id("\nEnter ID of the book to update: ")?;
        let qty = self.prompt.integer("Enter new quantity: ", NOT_A_NUMBER)?;
        let mut update = BookUpdate::quantity(book_id, qty);

        if self.prompt.confirm("Update title or author ID? (Y/N): ")? {
            update.title = self
                .prompt
                .optional_text("Enter new title (leave blank to keep current): ")?;
            update.author_id = self
                .prompt
                .optional_four_digit_id("Enter new author ID (leave blank to keep current): ")?;
        }

        let mut patch = AuthorPatch::default();
        if self.prompt.confirm("Update author name or country? (Y/N): ")? {
            self.show(ViewMode::WithAuthors)?;
            patch.name = self
                .prompt
                .optional_text("Enter new author name (leave blank to keep current): ")?;
            patch.country = self
                .prompt
                .optional_text("Enter new country (leave blank to keep current): ")?;
        }

        let result = update_book(&self.db, &mut self.catalog, &update, &patch);
        match self.settle(result)? {
            Some(true) => self.prompt.info("Book successfully updated"),
            Some(false) => self
                .prompt
                .error(&format!("Book with ID {book_id} was not found")),
            None => Ok(()),
        }
    }

    fn delete(&mut self) -> Result<()> {
        self.show(ViewMode::Books)?;

        let book_id = self
            .prompt
            .integer("\nEnter ID of a book you want to delete: ", NOT_A_NUMBER)?;
        let result = delete_book(&self.db, &mut self.catalog, book_id);
        match self.settle(result)? {
            Some(true) => self.prompt.info("Book successfully deleted"),
            Some(false) => self
                .prompt
                .error(&format!("Book with ID {book_id} was not found")),
            None => Ok(()),
        }
    }

    fn search(&mut self) -> Result<()> {
        let title = self
            .prompt
            .line("\nEnter the title of the book you want: ")?;
        let matches = search_books(&self.db, &title)?;
        if matches.is_empty() {
            return self.prompt.error("Book was not found");
        }
        for book in &matches {
            self.prompt.say(book)?;
        }
        Ok(())
    }

    /// Print one of the two listings, or a notice when it is empty.
    fn show(&mut self, mode: ViewMode) -> Result<()> {
        let listing = view_books(&self.db, mode)?;
        if listing.is_empty() {
            return self.prompt.say("\nNo books found");
        }
        match listing {
            BookListing::Books(books) => {
                self.prompt.say("\nList of books available:")?;
                self.prompt.say(books_table(&books))
            }
            BookListing::WithAuthors(credits) => {
                self.prompt.say("\nList of books with their authors:")?;
                self.prompt.say(credits_table(&credits))
            }
        }
    }

    /// Report recoverable catalog errors to the user and swallow them; storage
    /// failures keep propagating.
    fn settle<T>(&mut self, result: CatalogResult<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(
                err @ (CatalogError::UnknownAuthor(_)
                | CatalogError::AuthorIdTaken(_)
                | CatalogError::BookIdTaken(_)),
            ) => {
                self.prompt.error(&err.to_string())?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

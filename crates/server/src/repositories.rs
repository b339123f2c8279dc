mod book;

pub use book::BookRepository;

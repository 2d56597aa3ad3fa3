use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, ItemFn, Pat, Signature, Type};

/// Turn a function into a test running against a fresh in-memory database,
/// inject dependencies, and ensure that the database is closed regardless of
/// how the test terminates.
///
/// Injectable dependencies are [`crate::db::Database`] itself and any type
/// `T` providing `T::from_db(&Database)`, i.e. the repositories and services.
#[proc_macro_attribute]
pub fn backend_test(_args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);

    // Extract the injection list and reject invalid function signatures.
    let injections = match check_sig(item_fn.sig.clone()) {
        Ok(injections) => injections,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Rename the body so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_body", name);
    item_fn.sig.ident = new_name.clone();

    // Rewrite the test function.
    quote! {
        #[test]
        fn #name() {
            /// Test setup.
            fn setup() -> crate::db::Database {
                log4rs_test_utils::test_logging::init_logging_once_for(
                    ["university_elections"],
                    None,
                    None,
                );
                crate::db::Database::open_in_memory().unwrap()
            }

            /// The test itself.
            #item_fn

            /// Test cleanup.
            fn cleanup(db: crate::db::Database) {
                db.close().unwrap();
            }

            // Run the setup.
            let db = setup();

            // Run the test, catching any panics. The database handle is not
            // `UnwindSafe`, but nothing observes it after a panic except
            // the cleanup.
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                #new_name(#(#injections),*);
            }));

            // Run the cleanup.
            cleanup(db);

            // If the test panicked, re-raise the panic.
            if let Err(cause) = result {
                std::panic::resume_unwind(cause);
            }
        }
    }
    .into()
}

/// Ensure the wrapped test is synchronous and build the expression injected
/// for each parameter, in declaration order.
fn check_sig(sig: Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if let Some(asyncness) = sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "Test must not be `async`; storage access is synchronous",
        ));
    }

    let mut has_db = false;
    let mut injections = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let Pat::Ident(_) = &*pat_type.pat {
                if let Type::Path(type_path) = &*pat_type.ty {
                    if let Some(type_ident) = type_path.path.get_ident() {
                        if type_ident == "Database" {
                            if has_db {
                                return Err(syn::Error::new(
                                    input.span(),
                                    "Test cannot accept more than one `Database`",
                                ));
                            }
                            has_db = true;
                            injections.push(quote! { db.clone() });
                        } else {
                            injections.push(quote! { #type_ident::from_db(&db) });
                        }
                        continue;
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected `db_ident: Database` or `ident: T` where `T::from_db(&Database)` exists",
        ));
    }

    Ok(injections)
}

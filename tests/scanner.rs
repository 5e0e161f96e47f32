#[cfg(test)]
mod scanner_tests {
    use fourbanger::interpreter::{tokenize, Grammar};
    use fourbanger::scanner::*;
    use fourbanger::token::*;

    fn assert_token_sequence(source: &str, grammar: Grammar, expected: &[(TokenType, &str)]) {
        let tokens = tokenize(source, grammar);

        assert_eq!(tokens.len(), expected.len(), "tokens: {:?}", tokens);

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_operators() {
        assert_token_sequence(
            "(+-*/)=",
            Grammar::Extended,
            &[
                (TokenType::OPEN_PAREN, "("),
                (TokenType::ADD_OP, "+"),
                (TokenType::SUB_OP, "-"),
                (TokenType::MUL_OP, "*"),
                (TokenType::DIV_OP, "/"),
                (TokenType::CLOSE_PAREN, ")"),
                (TokenType::EQUAL_OP, "="),
                (TokenType::END_OF_STREAM, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_numbers_stop_at_first_non_digit() {
        assert_token_sequence(
            "  12 *\t(3405)\n",
            Grammar::Base,
            &[
                (TokenType::NUMBER(12), "12"),
                (TokenType::MUL_OP, "*"),
                (TokenType::OPEN_PAREN, "("),
                (TokenType::NUMBER(3405), "3405"),
                (TokenType::CLOSE_PAREN, ")"),
                (TokenType::END_OF_STREAM, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_digit_sequences() {
        for n in [0_i64, 7, 10, 99, 1_000_001, 9_223_372_036_854_775_807] {
            let source = n.to_string();
            let stream = TokenStream::new(&source, Grammar::Base);

            assert_eq!(stream.current().token_type, TokenType::NUMBER(n));
            assert_eq!(stream.current().lexeme, source);
        }

        // leading zeros are just digits
        let stream = TokenStream::new("007+", Grammar::Base);
        assert_eq!(stream.current().token_type, TokenType::NUMBER(7));
        assert_eq!(stream.current().lexeme, "007");
    }

    #[test]
    fn test_scanner_04_number_overflow_wraps() {
        let stream = TokenStream::new("9223372036854775808", Grammar::Base);

        assert_eq!(stream.current().token_type, TokenType::NUMBER(i64::MIN));
    }

    #[test]
    fn test_scanner_05_end_of_stream_repeats() {
        let mut stream = TokenStream::new("1", Grammar::Extended);

        stream.advance();
        assert_eq!(stream.current().token_type, TokenType::END_OF_STREAM);

        stream.advance();
        stream.advance();
        assert_eq!(stream.current().token_type, TokenType::END_OF_STREAM);
    }

    #[test]
    fn test_scanner_06_empty_and_blank_input() {
        for source in ["", "   ", "\t\r\n\x0b\x0c"] {
            let stream = TokenStream::new(source, Grammar::Extended);

            assert_eq!(stream.current().token_type, TokenType::END_OF_STREAM);
        }
    }

    #[test]
    fn test_scanner_07_identifier_ends_at_space_only() {
        assert_token_sequence(
            "total = 4",
            Grammar::Extended,
            &[
                (TokenType::IDENTIFIER("total".into()), "total"),
                (TokenType::EQUAL_OP, "="),
                (TokenType::NUMBER(4), "4"),
                (TokenType::END_OF_STREAM, ""),
            ],
        );

        assert_token_sequence(
            "x=1+2",
            Grammar::Extended,
            &[
                (TokenType::IDENTIFIER("x=1+2".into()), "x=1+2"),
                (TokenType::END_OF_STREAM, ""),
            ],
        );

        assert_token_sequence(
            "a\tb c",
            Grammar::Extended,
            &[
                (TokenType::IDENTIFIER("a\tb".into()), "a\tb"),
                (TokenType::IDENTIFIER("c".into()), "c"),
                (TokenType::END_OF_STREAM, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_08_letters_are_illegal_in_base_grammar() {
        assert_token_sequence(
            "x=1",
            Grammar::Base,
            &[
                (TokenType::ILLEGAL, "x"),
                (TokenType::EQUAL_OP, "="),
                (TokenType::NUMBER(1), "1"),
                (TokenType::END_OF_STREAM, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_09_illegal_characters() {
        assert_token_sequence(
            "1@2 é",
            Grammar::Extended,
            &[
                (TokenType::NUMBER(1), "1"),
                (TokenType::ILLEGAL, "@"),
                (TokenType::NUMBER(2), "2"),
                (TokenType::ILLEGAL, "é"),
                (TokenType::END_OF_STREAM, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_10_columns() {
        let tokens = tokenize(" 12 + (3)", Grammar::Extended);
        let columns: Vec<usize> = tokens.iter().map(|t| t.column).collect();

        assert_eq!(columns, vec![2, 5, 7, 8, 9, 10]);
    }

    #[test]
    fn test_scanner_11_display() {
        let tokens = tokenize("42 + n", Grammar::Extended);
        let lines: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            lines,
            vec![
                "NUMBER 42 42",
                "ADD_OP + null",
                "IDENTIFIER n n",
                "END_OF_STREAM  null",
            ]
        );
    }

    #[test]
    fn test_scanner_12_same_kind_ignores_payload() {
        assert!(TokenType::NUMBER(1).same_kind(&TokenType::NUMBER(2)));
        assert!(TokenType::IDENTIFIER("a".into()).same_kind(&TokenType::IDENTIFIER("b".into())));
        assert_ne!(TokenType::NUMBER(1), TokenType::NUMBER(2));
        assert!(!TokenType::ADD_OP.same_kind(&TokenType::SUB_OP));
    }
}
